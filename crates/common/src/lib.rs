//! Shared types for the cube arena.
//!
//! # Invariants
//! - `Aabb::min <= Aabb::max` componentwise for every box built through the
//!   public constructors.

pub mod aabb;
pub mod types;

pub use aabb::Aabb;
pub use types::{Axis, Transform};
