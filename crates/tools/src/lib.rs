//! Developer Tooling: read-only arena inspection.

mod inspector;

pub use inspector::{ArenaInspector, ArenaSummary, OutcomeKind};

pub fn crate_info() -> &'static str {
    "arena-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
