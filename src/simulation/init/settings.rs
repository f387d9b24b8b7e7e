use serde::{Deserialize, Serialize};

use crate::common::{PhysicsError, PhysicsResult};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// World parameters. Every field is optional in JSON; the defaults are the
/// sandbox's canvas (900x450) and slider positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration; negative inverts
    pub gravity: f32,
    /// Restitution for bodies without their own
    pub bounce_dampening: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 450.0,
            gravity: 7.0,
            bounce_dampening: 0.5,
        }
    }
}

impl WorldConfig {
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        validate_bounds(self.width, self.height)?;
        validate_gravity(self.gravity)?;
        validate_dampening(self.bounce_dampening)
    }
}

fn validate_gravity(g: f32) -> PhysicsResult<()> {
    if g.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidConfig(format!("gravity must be finite, got {}", g)))
    }
}

/// Out-of-range values are clamped later; only NaN has no sensible reading.
fn validate_dampening(d: f32) -> PhysicsResult<()> {
    if d.is_nan() {
        Err(PhysicsError::InvalidConfig("bounceDampening is NaN".to_string()))
    } else {
        Ok(())
    }
}

/// Infinite bounds are allowed and mean "unbounded".
fn validate_bounds(width: f32, height: f32) -> PhysicsResult<()> {
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidConfig(format!(
            "world bounds must be positive, got {}x{}",
            width, height
        )))
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut WorldCore, g: f32) -> PhysicsResult<()> {
    validate_gravity(g)?;
    world.gravity = g;
    Ok(())
}

pub(super) fn set_bounce_dampening(world: &mut WorldCore, d: f32) -> PhysicsResult<()> {
    validate_dampening(d)?;
    world.bounce_dampening = d.clamp(0.0, 1.0);
    Ok(())
}

pub(super) fn set_bounds(world: &mut WorldCore, width: f32, height: f32) -> PhysicsResult<()> {
    validate_bounds(width, height)?;
    world.width = width;
    world.height = height;
    Ok(())
}
