//! Error types for the simulation core.

use thiserror::Error;

pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Everything the core can refuse to do.
///
/// All variants are local and synchronous. Nothing is retried: the caller
/// (usually the JS render loop) logs the failure and skips the operation
/// for that frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be finite and positive for a movable body.
    #[error("invalid mass {mass}: movable bodies need a finite mass > 0")]
    InvalidMass { mass: f32 },

    /// Scalar division of a vector by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// No live body carries this uid.
    #[error("unknown body uid: {0}")]
    UnknownUid(u32),

    /// Geometry went non-finite somewhere upstream.
    #[error("unreachable invariant: {0}")]
    UnreachableInvariant(&'static str),

    /// Malformed or out-of-range configuration or body descriptor.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for PhysicsError {
    fn from(err: serde_json::Error) -> Self {
        PhysicsError::InvalidConfig(err.to_string())
    }
}
