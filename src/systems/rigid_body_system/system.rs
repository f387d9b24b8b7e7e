use crate::common::{PerfTimer, PhysicsError, PhysicsResult};
use crate::rigid_body::{Body, BodyDesc, Vector2};

use super::bounds::clamp_limits;
use super::collision::{check_overlap, resolve_position, resolve_velocities};

/// Below this many bodies the integration pass stays on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

/// Global parameters for one step
#[derive(Clone, Copy, Debug)]
pub struct StepParams {
    pub dt: f32,
    pub gravity: f32,
    pub bounce_dampening: f32,
    /// World rectangle used when a body has no bounds of its own
    pub world_min: Vector2,
    pub world_max: Vector2,
}

/// What one update did (timings are only filled when requested)
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepReport {
    pub pairs_checked: u32,
    pub collisions_resolved: u32,
    pub integrate_ms: f64,
    pub collision_ms: f64,
}

/// Owns all bodies of a world, in insertion order
#[derive(Clone, Debug)]
pub struct RigidBodySystem {
    bodies: Vec<Body>,
    /// Working copy for `update`, kept between steps to reuse allocations
    scratch: Vec<Body>,
    next_id: u32,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            scratch: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a new body at the end of the iteration order.
    ///
    /// Uids start at 1 and are never reused until `clear()`.
    pub fn add_body(&mut self, desc: BodyDesc) -> PhysicsResult<u32> {
        let id = self.next_id;
        let body = Body::new(id, desc)?;
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(body);
        log::debug!("added body {} ({} total)", id, self.bodies.len());
        Ok(id)
    }

    /// Remove a body by uid. Survivors keep their uids and relative order.
    pub fn remove_body(&mut self, id: u32) -> PhysicsResult<Body> {
        let idx = self.index_of(id)?;
        let body = self.bodies.remove(idx);
        log::debug!("removed body {} ({} left)", id, self.bodies.len());
        Ok(body)
    }

    /// Remove all bodies and restart uid allocation.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.scratch.clear();
        self.next_id = 1;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, id: u32) -> PhysicsResult<&Body> {
        let idx = self.index_of(id)?;
        Ok(&self.bodies[idx])
    }

    pub fn get_mut(&mut self, id: u32) -> PhysicsResult<&mut Body> {
        let idx = self.index_of(id)?;
        Ok(&mut self.bodies[idx])
    }

    /// First body (in insertion order) whose rectangle contains the point.
    pub fn body_at(&self, x: f32, y: f32) -> Option<u32> {
        self.bodies
            .iter()
            .find(|b| b.bounds().contains(x, y))
            .map(Body::uid)
    }

    fn index_of(&self, id: u32) -> PhysicsResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.uid() == id)
            .ok_or(PhysicsError::UnknownUid(id))
    }

    /// Main update: gravity, integration and clamping for every body, then
    /// the pairwise collision sweep.
    ///
    /// Runs on a scratch copy so a failure leaves the bodies untouched.
    pub fn update(&mut self, params: &StepParams, timed: bool) -> PhysicsResult<SweepReport> {
        let mut report = SweepReport::default();
        self.scratch.clone_from(&self.bodies);
        let next = &mut self.scratch;

        let t0 = timed.then(PerfTimer::start);
        integrate_all(next, params);
        if let Some(t) = t0 {
            report.integrate_ms = t.elapsed_ms();
        }

        let t1 = timed.then(PerfTimer::start);
        if let Err(err) = resolve_collisions(next, params.bounce_dampening, &mut report) {
            log::error!("collision sweep aborted, step discarded: {}", err);
            return Err(err);
        }
        if let Some(t) = t1 {
            report.collision_ms = t.elapsed_ms();
        }

        std::mem::swap(&mut self.bodies, &mut self.scratch);
        Ok(report)
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

fn advance_body(body: &mut Body, params: &StepParams) {
    body.apply_gravity(params.gravity);
    body.integrate(params.dt);
    let (min, max) = clamp_limits(body, params.world_min, params.world_max);
    let damp = body.dampening_or(params.bounce_dampening);
    body.clamp_to_bounds(Some(min), Some(max), damp);
}

/// Per-body phase. Bodies do not interact here, so order is irrelevant.
fn integrate_all(bodies: &mut [Body], params: &StepParams) {
    #[cfg(feature = "parallel")]
    {
        if bodies.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            bodies.par_iter_mut().for_each(|b| advance_body(b, params));
            return;
        }
    }
    for body in bodies.iter_mut() {
        advance_body(body, params);
    }
}

/// O(n^2) sweep over unordered pairs `(i, j)`, `i < j`, in insertion order.
///
/// Body `i` is corrected first, so declaration order changes outcomes.
fn resolve_collisions(
    bodies: &mut [Body],
    default_damp: f32,
    report: &mut SweepReport,
) -> PhysicsResult<()> {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if !a.collidable || !b.collidable {
                continue;
            }
            report.pairs_checked += 1;
            if resolve_pair(a, b, default_damp)? {
                report.collisions_resolved += 1;
            }
        }
    }
    Ok(())
}

/// Resolve one pair. Returns false when they do not overlap.
pub(super) fn resolve_pair(a: &mut Body, b: &mut Body, default_damp: f32) -> PhysicsResult<bool> {
    if !check_overlap(&a.bounds(), &b.bounds()) {
        return Ok(false);
    }

    let (v1, v2) = resolve_velocities(
        a.mass(),
        b.mass(),
        a.velocity,
        b.velocity,
        a.dampening_or(default_damp),
        b.dampening_or(default_damp),
    );

    if !a.is_immovable() {
        a.position = resolve_position(&a.bounds(), &b.bounds())?;
        a.velocity = v1;
    }

    let still_overlapping = check_overlap(&a.bounds(), &b.bounds());
    if !b.is_immovable() {
        if a.is_immovable() || still_overlapping {
            b.position = resolve_position(&b.bounds(), &a.bounds())?;
        }
        b.velocity = v2;
    }

    Ok(true)
}
