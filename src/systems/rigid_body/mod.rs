//! Body - a single non-rotating rectangle
//!
//! Position is the top-left corner; acceleration is impulse-like and is
//! cleared by every integration.

mod vec2;
mod body;

pub use vec2::Vector2;
pub use body::{Aabb, Body, BodyDesc, BodyKind, Volume};
pub(crate) use body::require_finite;
