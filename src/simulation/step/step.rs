use crate::common::{PerfTimer, PhysicsError, PhysicsResult};
use crate::rigid_body::Vector2;
use crate::rigid_body_system::StepParams;

use super::commands::drain_pending;
use super::WorldCore;

pub(super) fn step(world: &mut WorldCore, dt: f32) -> PhysicsResult<()> {
    if !dt.is_finite() {
        return Err(PhysicsError::InvalidConfig(format!("dt must be finite, got {}", dt)));
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = perf_on.then(PerfTimer::start);

    // === QUEUED COMMANDS ===
    // Applied between frames, before any body is touched by physics.
    let commands_applied = drain_pending(world);

    // === RIGID BODY PHYSICS ===
    let params = StepParams {
        dt,
        gravity: world.gravity,
        bounce_dampening: world.bounce_dampening,
        world_min: Vector2::zero(),
        world_max: Vector2::new(world.width, world.height),
    };
    let report = world.rigid_bodies.update(&params, perf_on)?;

    world.frame += 1;

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.integrate_ms = report.integrate_ms;
        stats.collision_ms = report.collision_ms;
        stats.pairs_checked = report.pairs_checked;
        stats.collisions_resolved = report.collisions_resolved;
        stats.commands_applied = commands_applied;
        stats.body_count = world.rigid_bodies.body_count() as u32;
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }
    }

    Ok(())
}
