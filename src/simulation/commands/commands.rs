use serde::{Deserialize, Serialize};

use crate::common::{PhysicsError, PhysicsResult};
use crate::rigid_body::{require_finite, BodyDesc, Vector2, Volume};

use super::WorldCore;

/// A world mutation that can be deferred to the next step.
///
/// UI handlers fire between frames; queuing keeps the body list from
/// changing shape while a step iterates it. JSON form is internally tagged:
/// `{"type": "removeBody", "uid": 3}`.
///
/// A queued `AddBody` gets its uid when the queue drains. Bodies are
/// appended in order, so it is the last entry of `bodies()` right after
/// the command runs; the uid is also logged at debug level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorldCommand {
    AddBody(BodyDesc),
    #[serde(rename_all = "camelCase")]
    RemoveBody { uid: u32 },
    #[serde(rename_all = "camelCase")]
    SetGravity { gravity: f32 },
    #[serde(rename_all = "camelCase")]
    SetBounceDampening { bounce_dampening: f32 },
    #[serde(rename_all = "camelCase")]
    ApplyForce { uid: u32, force: Vector2 },
}

impl WorldCommand {
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(super) fn enqueue(world: &mut WorldCore, command: WorldCommand) {
    world.pending.push_back(command);
}

fn apply(world: &mut WorldCore, command: WorldCommand) -> PhysicsResult<()> {
    match command {
        WorldCommand::AddBody(desc) => {
            let uid = add_body(world, desc)?;
            log::debug!("queued body created with uid {}", uid);
            Ok(())
        }
        WorldCommand::RemoveBody { uid } => remove_body(world, uid),
        WorldCommand::SetGravity { gravity } => world.set_gravity(gravity),
        WorldCommand::SetBounceDampening { bounce_dampening } => {
            world.set_bounce_dampening(bounce_dampening)
        }
        WorldCommand::ApplyForce { uid, force } => apply_force(world, uid, force),
    }
}

/// Run queued commands in order. Failures are logged and skipped.
///
/// Returns how many commands succeeded.
pub(super) fn drain_pending(world: &mut WorldCore) -> u32 {
    let mut applied = 0u32;
    while let Some(command) = world.pending.pop_front() {
        let label = format!("{:?}", command);
        match apply(world, command) {
            Ok(()) => applied += 1,
            Err(err) => log::warn!("skipping queued command {}: {}", label, err),
        }
    }
    applied
}

pub(super) fn add_body(world: &mut WorldCore, desc: BodyDesc) -> PhysicsResult<u32> {
    world.rigid_bodies.add_body(desc)
}

pub(super) fn remove_body(world: &mut WorldCore, uid: u32) -> PhysicsResult<()> {
    world.rigid_bodies.remove_body(uid).map(|_| ())
}

pub(super) fn clear(world: &mut WorldCore) {
    world.rigid_bodies.clear();
    world.pending.clear();
    world.render_buffer.clear();
}

pub(super) fn apply_force(world: &mut WorldCore, uid: u32, force: Vector2) -> PhysicsResult<()> {
    world.rigid_bodies.get_mut(uid)?.apply_force(force)
}

pub(super) fn set_position(world: &mut WorldCore, uid: u32, position: Vector2) -> PhysicsResult<()> {
    require_finite("position", position)?;
    world.rigid_bodies.get_mut(uid)?.position = position;
    Ok(())
}

pub(super) fn set_velocity(world: &mut WorldCore, uid: u32, velocity: Vector2) -> PhysicsResult<()> {
    require_finite("velocity", velocity)?;
    world.rigid_bodies.get_mut(uid)?.velocity = velocity;
    Ok(())
}

pub(super) fn set_acceleration(
    world: &mut WorldCore,
    uid: u32,
    acceleration: Vector2,
) -> PhysicsResult<()> {
    require_finite("acceleration", acceleration)?;
    world.rigid_bodies.get_mut(uid)?.acceleration = acceleration;
    Ok(())
}

pub(super) fn set_volume(world: &mut WorldCore, uid: u32, width: f32, height: f32) -> PhysicsResult<()> {
    if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
        return Err(PhysicsError::InvalidConfig(format!(
            "volume must be finite and non-negative, got {}x{}",
            width, height
        )));
    }
    world.rigid_bodies.get_mut(uid)?.volume = Volume::new(width, height);
    Ok(())
}

pub(super) fn set_mass(world: &mut WorldCore, uid: u32, mass: f32) -> PhysicsResult<()> {
    world.rigid_bodies.get_mut(uid)?.set_mass(mass)
}

pub(super) fn set_immovable(world: &mut WorldCore, uid: u32, immovable: bool) -> PhysicsResult<()> {
    world.rigid_bodies.get_mut(uid)?.set_immovable(immovable)
}

pub(super) fn set_fill(world: &mut WorldCore, uid: u32, fill: &str) -> PhysicsResult<()> {
    world.rigid_bodies.get_mut(uid)?.fill = fill.to_string();
    Ok(())
}
