//! Boxsim Engine - 2D rigid-body kernel for the physics sandbox, in WASM
//!
//! Axis-aligned, non-rotating rectangles under gravity with semi-implicit
//! Euler integration, bounded worlds with bounce, and O(n^2) pairwise AABB
//! collision resolution. Drawing, input and UI stay in JS: the page calls
//! `World::step(dt)` once per frame and reads body state back.
//!
//! Architecture:
//! - common/      - Errors and the console log bridge
//! - systems/     - Bodies, vectors, collision resolution
//! - simulation/  - World orchestration and the JS facade

pub mod common;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths used across the crate)
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    common::init_logging(log::LevelFilter::Info);
    log::info!("Boxsim engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use common::{PhysicsError, PhysicsResult};
pub use rigid_body::{Aabb, Body, BodyDesc, BodyKind, Vector2, Volume};
pub use simulation::{BodySnapshot, PerfStats, World, WorldCommand, WorldConfig, WorldCore};
