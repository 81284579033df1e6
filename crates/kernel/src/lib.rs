//! Arena Kernel: authoritative actor/wall state, fixed-step motion with
//! collision and bounce, deterministic replay hooks.
//!
//! # Invariants
//! - `Arena::step` is pure with respect to its input and the current state.
//! - Wall bounds never change after the arena is built.
//! - A displacement that would overlap a wall is never committed.
//! - Cooldowns never go negative.

pub mod arena;
pub mod config;

pub use arena::{Actor, Arena, ArenaEvent, Bounce, Cooldown, StepOutcome, Wall};
pub use config::{ArenaConfig, ConfigError, LayoutConfig, MotionConfig};
