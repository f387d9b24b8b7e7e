use std::collections::VecDeque;

use crate::rigid_body_system::RigidBodySystem;

use super::perf_stats::PerfStats;
use super::settings::WorldConfig;
use super::WorldCore;

/// Expects a validated config.
pub(super) fn create_world_core(config: WorldConfig) -> WorldCore {
    WorldCore {
        rigid_bodies: RigidBodySystem::new(),
        width: config.width,
        height: config.height,
        gravity: config.gravity,
        bounce_dampening: config.bounce_dampening.clamp(0.0, 1.0),
        frame: 0,
        pending: VecDeque::new(),
        // Small start; `extract_render_buffer` resizes on demand.
        render_buffer: Vec::with_capacity(64),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
