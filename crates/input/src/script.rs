use crate::key::{InputState, Key};

/// Errors from parsing an input script.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("segment {0:?} is not of the form keys:frames")]
    Malformed(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("invalid frame count {0:?}")]
    BadCount(String),
}

/// A sequence of per-frame input states for headless runs.
///
/// Text form is a comma-separated list of `keys:frames` segments, where
/// `keys` is `none` or key names joined with `+`:
///
/// ```text
/// up:30,none:10,up+left:5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    frames: Vec<InputState>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `input` for `frames` frames.
    pub fn hold(mut self, input: InputState, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, frames));
        self
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = Self::new();
        for segment in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (keys, count) = segment
                .split_once(':')
                .ok_or_else(|| ScriptError::Malformed(segment.to_string()))?;
            let frames: usize = count
                .trim()
                .parse()
                .map_err(|_| ScriptError::BadCount(count.trim().to_string()))?;
            let mut input = InputState::new();
            let keys = keys.trim();
            if !keys.eq_ignore_ascii_case("none") {
                for name in keys.split('+') {
                    let key = Key::from_name(name)
                        .ok_or_else(|| ScriptError::UnknownKey(name.trim().to_string()))?;
                    input.press(key);
                }
            }
            script = script.hold(input, frames);
        }
        Ok(script)
    }

    pub fn frames(&self) -> &[InputState] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl std::str::FromStr for InputScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segments_in_order() {
        let script = InputScript::parse("up:2, none:1, up+left:3").unwrap();
        assert_eq!(script.len(), 6);
        assert_eq!(script.frames()[0], InputState::holding(&[Key::Up]));
        assert_eq!(script.frames()[2], InputState::new());
        assert_eq!(script.frames()[5], InputState::holding(&[Key::Up, Key::Left]));
    }

    #[test]
    fn empty_text_is_empty_script() {
        assert!(InputScript::parse("").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_segments() {
        assert_eq!(
            InputScript::parse("up"),
            Err(ScriptError::Malformed("up".into()))
        );
        assert_eq!(
            InputScript::parse("jump:3"),
            Err(ScriptError::UnknownKey("jump".into()))
        );
        assert_eq!(
            InputScript::parse("up:-1"),
            Err(ScriptError::BadCount("-1".into()))
        );
    }

    #[test]
    fn builder_matches_parsed_form() {
        let built = InputScript::new()
            .hold(InputState::holding(&[Key::Down]), 2)
            .hold(InputState::new(), 1);
        assert_eq!(built, "down:2,none:1".parse().unwrap());
    }
}
