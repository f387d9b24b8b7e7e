//! World - owns the bodies and global parameters of one simulation
//!
//! The core is plain Rust; `facade.rs` wraps it for JS. Operations live in
//! small files next to this one and are delegated to from `WorldCore`:
//! - init/      construction and runtime settings
//! - commands/  body mutation API and the between-steps command queue
//! - step/      one frame of simulation
//! - render/    read-back for the adapter (snapshots, packed buffer)
//! - perf/      optional timing

use std::collections::VecDeque;

use crate::common::PhysicsResult;
use crate::rigid_body::{Body, BodyDesc, Vector2};
use crate::rigid_body_system::RigidBodySystem;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use commands::WorldCommand;
pub use facade::World;
pub use perf_stats::PerfStats;
pub use render_extract::{BodySnapshot, MAX_EXACT_RENDER_UID, RENDER_STRIDE};
pub use settings::WorldConfig;

/// The simulation world
pub struct WorldCore {
    rigid_bodies: RigidBodySystem,

    // Settings
    width: f32,
    height: f32,
    gravity: f32,
    bounce_dampening: f32,

    // State
    frame: u64,
    pending: VecDeque<WorldCommand>,

    // Render read-back: RENDER_STRIDE floats per body
    render_buffer: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create an empty world with the default settings and the given bounds
    pub fn new(width: f32, height: f32) -> PhysicsResult<Self> {
        Self::from_config(WorldConfig {
            width,
            height,
            ..WorldConfig::default()
        })
    }

    pub fn from_config(config: WorldConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(init::create_world_core(config))
    }

    pub fn from_config_json(json: &str) -> PhysicsResult<Self> {
        Self::from_config(WorldConfig::from_json(json)?)
    }

    pub fn width(&self) -> f32 { self.width }

    pub fn height(&self) -> f32 { self.height }

    pub fn gravity(&self) -> f32 { self.gravity }

    pub fn bounce_dampening(&self) -> f32 { self.bounce_dampening }

    /// Number of successful steps so far
    pub fn frame(&self) -> u64 { self.frame }

    // === SETTINGS ===

    /// Rejects non-finite values
    pub fn set_gravity(&mut self, g: f32) -> PhysicsResult<()> {
        settings::set_gravity(self, g)
    }

    /// Clamped to [0, 1]; NaN is rejected
    pub fn set_bounce_dampening(&mut self, d: f32) -> PhysicsResult<()> {
        settings::set_bounce_dampening(self, d)
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) -> PhysicsResult<()> {
        settings::set_bounds(self, width, height)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === BODY API ===

    /// Add a body immediately. Returns its uid.
    pub fn add_body(&mut self, desc: BodyDesc) -> PhysicsResult<u32> {
        commands::add_body(self, desc)
    }

    pub fn remove_body(&mut self, uid: u32) -> PhysicsResult<()> {
        commands::remove_body(self, uid)
    }

    /// Remove all bodies and pending commands
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    pub fn body(&self, uid: u32) -> PhysicsResult<&Body> {
        self.rigid_bodies.get(uid)
    }

    /// Bodies in insertion order (the order collisions are resolved in)
    pub fn bodies(&self) -> &[Body] {
        self.rigid_bodies.bodies()
    }

    pub fn body_count(&self) -> usize {
        self.rigid_bodies.body_count()
    }

    /// Uid of the first body containing the point, edges included
    pub fn body_at(&self, x: f32, y: f32) -> Option<u32> {
        self.rigid_bodies.body_at(x, y)
    }

    pub fn apply_force(&mut self, uid: u32, force: Vector2) -> PhysicsResult<()> {
        commands::apply_force(self, uid, force)
    }

    pub fn set_position(&mut self, uid: u32, position: Vector2) -> PhysicsResult<()> {
        commands::set_position(self, uid, position)
    }

    pub fn set_velocity(&mut self, uid: u32, velocity: Vector2) -> PhysicsResult<()> {
        commands::set_velocity(self, uid, velocity)
    }

    pub fn set_acceleration(&mut self, uid: u32, acceleration: Vector2) -> PhysicsResult<()> {
        commands::set_acceleration(self, uid, acceleration)
    }

    pub fn set_volume(&mut self, uid: u32, width: f32, height: f32) -> PhysicsResult<()> {
        commands::set_volume(self, uid, width, height)
    }

    pub fn set_mass(&mut self, uid: u32, mass: f32) -> PhysicsResult<()> {
        commands::set_mass(self, uid, mass)
    }

    pub fn set_immovable(&mut self, uid: u32, immovable: bool) -> PhysicsResult<()> {
        commands::set_immovable(self, uid, immovable)
    }

    /// Opaque render tag, stored as given
    pub fn set_fill(&mut self, uid: u32, fill: &str) -> PhysicsResult<()> {
        commands::set_fill(self, uid, fill)
    }

    /// Queue a mutation to run at the start of the next `step`
    pub fn enqueue(&mut self, command: WorldCommand) {
        commands::enqueue(self, command)
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    // === SIMULATION ===

    /// Advance the simulation by `dt`.
    ///
    /// Queued commands run first, then gravity, integration, bounds and the
    /// collision sweep. On error the bodies are left as they were before
    /// the physics pass.
    pub fn step(&mut self, dt: f32) -> PhysicsResult<()> {
        step::step(self, dt)
    }

    // === RENDER READ-BACK ===

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        render_extract::snapshot(self)
    }

    pub fn bodies_json(&self) -> String {
        render_extract::bodies_json(self)
    }

    /// Refill the packed render buffer. Returns the number of bodies written.
    pub fn extract_render_buffer(&mut self) -> usize {
        render_extract::extract_render_buffer(self)
    }

    pub fn render_buffer(&self) -> &[f32] {
        &self.render_buffer
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
