use serde::Serialize;

use crate::rigid_body::{Body, BodyKind, Vector2, Volume};

use super::WorldCore;

/// Floats per body in the packed render buffer: `[uid, x, y, w, h]`
pub const RENDER_STRIDE: usize = 5;

/// Largest uid the packed buffer carries exactly (2^24, the f32 mantissa).
/// Past it, match bodies through `bodies_json` instead.
pub const MAX_EXACT_RENDER_UID: u32 = 1 << 24;

/// Read-only copy of a body for drawing and UI panels
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub uid: u32,
    pub position: Vector2,
    pub volume: Volume,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub mass: f32,
    pub fill: String,
    pub kind: BodyKind,
    pub immovable: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            uid: body.uid(),
            position: body.position,
            volume: body.volume,
            velocity: body.velocity,
            acceleration: body.acceleration,
            mass: body.mass(),
            fill: body.fill.clone(),
            kind: body.kind,
            immovable: body.is_immovable(),
        }
    }
}

pub(super) fn snapshot(world: &WorldCore) -> Vec<BodySnapshot> {
    world.bodies().iter().map(BodySnapshot::from).collect()
}

pub(super) fn bodies_json(world: &WorldCore) -> String {
    // Plain data with string keys; serialization cannot fail.
    serde_json::to_string(&snapshot(world)).unwrap_or_else(|err| {
        log::error!("failed to serialize body snapshot: {}", err);
        "[]".to_string()
    })
}

pub(super) fn extract_render_buffer(world: &mut WorldCore) -> usize {
    let count = world.rigid_bodies.body_count();
    world.render_buffer.clear();
    world.render_buffer.reserve(count * RENDER_STRIDE);

    for body in world.rigid_bodies.bodies() {
        if body.uid() > MAX_EXACT_RENDER_UID {
            log::warn!("uid {} is not exact in the render buffer", body.uid());
        }
        world.render_buffer.extend_from_slice(&[
            body.uid() as f32,
            body.position.x,
            body.position.y,
            body.volume.width,
            body.volume.height,
        ]);
    }

    count
}
