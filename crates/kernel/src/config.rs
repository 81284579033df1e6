use arena_common::Transform;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Errors from loading or validating an arena configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Motion constants for the actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Velocity magnitude set on an axis while its key is held.
    pub acceleration: f32,
    /// Scalar from velocity to per-frame displacement.
    pub speed: f32,
    /// Per-frame velocity retention when no input drives an axis. In (0, 1).
    pub decay: f32,
    /// Velocity retention on a wall bounce. In (0, 1).
    pub bounce_factor: f32,
    /// Seconds an axis ignores input after a bounce.
    pub cooldown_secs: f64,
    /// Fixed simulation timestep in seconds.
    pub timestep_secs: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            acceleration: 3.0,
            speed: 0.1,
            decay: 0.91,
            bounce_factor: 0.8,
            cooldown_secs: 0.5,
            timestep_secs: 1.0 / 60.0,
        }
    }
}

/// Geometry of the fixed scenario: a square floor fenced by four walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of the square floor, also the length of each wall.
    pub floor_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Side length of the actor cube.
    pub actor_size: f32,
    /// Gap between the floor and the bottom of the actor.
    pub actor_lift: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            floor_size: 30.0,
            wall_height: 5.0,
            wall_thickness: 1.0,
            actor_size: 1.0,
            actor_lift: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Where the actor starts.
    pub fn actor_start(&self) -> Vec3 {
        Vec3::new(0.0, self.actor_size / 2.0 + self.actor_lift, 0.0)
    }

    /// Placement and dimensions of the four boundary walls: far, near,
    /// left, right. The side walls are the same box turned a quarter turn
    /// about Y.
    pub fn walls(&self) -> [(Transform, Vec3); 4] {
        let dims = Vec3::new(self.floor_size, self.wall_height, self.wall_thickness);
        let half = self.floor_size / 2.0;
        let y = self.wall_height / 2.0;
        let turned = Quat::from_rotation_y(FRAC_PI_2);
        [
            (Transform::from_position(Vec3::new(0.0, y, half)), dims),
            (Transform::from_position(Vec3::new(0.0, y, -half)), dims),
            (
                Transform {
                    rotation: turned,
                    ..Transform::from_position(Vec3::new(-half, y, 0.0))
                },
                dims,
            ),
            (
                Transform {
                    rotation: turned,
                    ..Transform::from_position(Vec3::new(half, y, 0.0))
                },
                dims,
            ),
        ]
    }
}

/// Complete arena configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub motion: MotionConfig,
    pub layout: LayoutConfig,
}

impl ArenaConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!("loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        let l = &self.layout;
        unit_open("motion.decay", m.decay)?;
        unit_open("motion.bounce_factor", m.bounce_factor)?;
        positive("motion.acceleration", f64::from(m.acceleration))?;
        positive("motion.speed", f64::from(m.speed))?;
        positive("motion.cooldown_secs", m.cooldown_secs)?;
        positive("motion.timestep_secs", m.timestep_secs)?;
        positive("layout.floor_size", f64::from(l.floor_size))?;
        positive("layout.wall_height", f64::from(l.wall_height))?;
        positive("layout.wall_thickness", f64::from(l.wall_thickness))?;
        positive("layout.actor_size", f64::from(l.actor_size))?;
        if !(l.actor_lift.is_finite() && l.actor_lift >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "layout.actor_lift",
                reason: format!("must be finite and >= 0, got {}", l.actor_lift),
            });
        }
        if l.actor_lift >= l.wall_height {
            return Err(ConfigError::Invalid {
                field: "layout.actor_lift",
                reason: format!(
                    "actor bottom at {} clears walls of height {}",
                    l.actor_lift, l.wall_height
                ),
            });
        }
        if l.actor_size >= l.floor_size - l.wall_thickness {
            return Err(ConfigError::Invalid {
                field: "layout.actor_size",
                reason: format!(
                    "actor of size {} does not fit inside the walls",
                    l.actor_size
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and > 0, got {value}"),
        })
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must lie strictly between 0 and 1, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn actor_starts_above_floor() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.actor_start(), Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn walls_fence_the_floor() {
        let walls = LayoutConfig::default().walls();
        assert_eq!(walls[0].0.position, Vec3::new(0.0, 2.5, 15.0));
        assert_eq!(walls[1].0.position, Vec3::new(0.0, 2.5, -15.0));
        assert_eq!(walls[2].0.position, Vec3::new(-15.0, 2.5, 0.0));
        assert_eq!(walls[3].0.position, Vec3::new(15.0, 2.5, 0.0));
        assert_eq!(walls[0].1, Vec3::new(30.0, 5.0, 1.0));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ArenaConfig::from_json_str(r#"{"motion":{"bounce_factor":0.5}}"#).unwrap();
        assert_eq!(config.motion.bounce_factor, 0.5);
        assert_eq!(config.motion.acceleration, 3.0);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn rejects_decay_of_one() {
        let err = ArenaConfig::from_json_str(r#"{"motion":{"decay":1.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "motion.decay",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_timestep() {
        let mut config = ArenaConfig::default();
        config.motion.timestep_secs = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_actor_larger_than_floor() {
        let mut config = ArenaConfig::default();
        config.layout.actor_size = 40.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_actor_above_walls() {
        let mut config = ArenaConfig::default();
        config.layout.actor_lift = 10.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "layout.actor_lift",
                ..
            }
        ));
        config.layout.actor_lift = config.layout.wall_height;
        assert!(config.validate().is_err());
        config.layout.actor_lift = config.layout.wall_height - 0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ArenaConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn json_roundtrip_preserves_config() {
        let config = ArenaConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(ArenaConfig::from_json_str(&json).unwrap(), config);
    }
}
