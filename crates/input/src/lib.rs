//! Input: four directional keys folded into per-frame flags.
//!
//! # Invariants
//! - Key events only set or clear flags; they never touch simulation state.
//! - Unrecognized keys are ignored.

pub mod key;
pub mod script;

pub use key::{InputState, Key};
pub use script::{InputScript, ScriptError};
