use wasm_bindgen::prelude::*;

use crate::common::PhysicsError;
use crate::rigid_body::{BodyDesc, Vector2};

use super::perf_stats::PerfStats;
use super::{WorldCommand, WorldCore};

fn js_err(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS handle to a simulation world
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given bounds and default gravity/dampening
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<World, JsValue> {
        let core = WorldCore::new(width, height).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Create a world from a `WorldConfig` JSON string
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: String) -> Result<World, JsValue> {
        let core = WorldCore::from_config_json(&json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn gravity(&self) -> f32 { self.core.gravity() }

    #[wasm_bindgen(getter)]
    pub fn bounce_dampening(&self) -> f32 { self.core.bounce_dampening() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, g: f32) -> Result<(), JsValue> {
        self.core.set_gravity(g).map_err(js_err)
    }

    pub fn set_bounce_dampening(&mut self, d: f32) -> Result<(), JsValue> {
        self.core.set_bounce_dampening(d).map_err(js_err)
    }

    /// Resize the world rectangle (e.g. when the canvas is resized)
    pub fn set_bounds(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.core.set_bounds(width, height).map_err(js_err)
    }

    // === BODY API ===

    /// Add a default-looking movable box. Returns its uid.
    pub fn add_body(&mut self, x: f32, y: f32, w: f32, h: f32, mass: f32) -> Result<u32, JsValue> {
        self.core
            .add_body(BodyDesc::rect(x, y, w, h, mass))
            .map_err(js_err)
    }

    /// Add a body from a `BodyDesc` JSON string. Returns its uid.
    pub fn add_body_json(&mut self, json: String) -> Result<u32, JsValue> {
        let desc = BodyDesc::from_json(&json).map_err(js_err)?;
        self.core.add_body(desc).map_err(js_err)
    }

    pub fn remove_body(&mut self, uid: u32) -> Result<(), JsValue> {
        self.core.remove_body(uid).map_err(js_err)
    }

    /// Remove all bodies
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Uid of the body under the cursor, or 0 when there is none
    pub fn body_at(&self, x: f32, y: f32) -> u32 {
        self.core.body_at(x, y).unwrap_or(0)
    }

    pub fn apply_force(&mut self, uid: u32, fx: f32, fy: f32) -> Result<(), JsValue> {
        self.core.apply_force(uid, Vector2::new(fx, fy)).map_err(js_err)
    }

    pub fn set_position(&mut self, uid: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_position(uid, Vector2::new(x, y)).map_err(js_err)
    }

    pub fn set_velocity(&mut self, uid: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_velocity(uid, Vector2::new(x, y)).map_err(js_err)
    }

    pub fn set_acceleration(&mut self, uid: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_acceleration(uid, Vector2::new(x, y)).map_err(js_err)
    }

    pub fn set_volume(&mut self, uid: u32, w: f32, h: f32) -> Result<(), JsValue> {
        self.core.set_volume(uid, w, h).map_err(js_err)
    }

    pub fn set_mass(&mut self, uid: u32, mass: f32) -> Result<(), JsValue> {
        self.core.set_mass(uid, mass).map_err(js_err)
    }

    pub fn set_immovable(&mut self, uid: u32, immovable: bool) -> Result<(), JsValue> {
        self.core.set_immovable(uid, immovable).map_err(js_err)
    }

    pub fn set_fill(&mut self, uid: u32, fill: String) -> Result<(), JsValue> {
        self.core.set_fill(uid, &fill).map_err(js_err)
    }

    /// Queue a `WorldCommand` JSON for the next step (safe from event handlers)
    pub fn queue_command(&mut self, json: String) -> Result<(), JsValue> {
        let command = WorldCommand::from_json(&json).map_err(js_err)?;
        self.core.enqueue(command);
        Ok(())
    }

    /// Step the simulation forward by `dt` (frame delta supplied by the render loop)
    pub fn step(&mut self, dt: f32) -> Result<(), JsValue> {
        self.core.step(dt).map_err(js_err)
    }

    // === RENDER READ-BACK ===

    /// All bodies as a JSON array of snapshots, in insertion order
    pub fn bodies_json(&self) -> String {
        self.core.bodies_json()
    }

    /// Refill the packed `[uid, x, y, w, h]` buffer; returns the body count
    pub fn extract_render_buffer(&mut self) -> usize {
        self.core.extract_render_buffer()
    }

    /// Pointer to the packed render buffer (valid until the next mutation)
    pub fn render_buffer_ptr(&self) -> *const f32 {
        self.core.render_buffer().as_ptr()
    }

    /// Render buffer length in floats
    pub fn render_buffer_len(&self) -> usize {
        self.core.render_buffer().len()
    }
}
