//! RigidBodySystem - AABB bodies under gravity with pairwise collisions
//!
//! Limits:
//! - No broad phase: every unordered pair is tested, O(n^2).
//! - No rotation, no continuous collision (fast bodies can tunnel).
//! - Separation uses the axis of least penetration, first body first,
//!   so insertion order is part of the result.

mod bounds;
mod collision;
mod system;

pub use collision::{check_overlap, resolve_position, resolve_velocities, separation_side, Side};
pub use system::{RigidBodySystem, StepParams, SweepReport};
