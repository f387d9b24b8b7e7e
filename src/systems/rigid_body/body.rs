use serde::{Deserialize, Serialize};

use crate::common::{PhysicsError, PhysicsResult};

use super::vec2::Vector2;

/// Rectangle size in world units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub width: f32,
    pub height: f32,
}

impl Volume {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned edges of a body. `top < bottom` since Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Inclusive point test (click selection), unlike the strict overlap test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.left <= x && self.right >= x && self.top <= y && self.bottom >= y
    }
}

/// Render tag carried for the adapter. The core never branches on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    #[default]
    Generic,
    Player,
    Platform,
}

/// Everything needed to create a body. Missing JSON fields fall back to the
/// sandbox's default body (50x50, mass 50, at rest near the top-left corner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyDesc {
    pub position: Vector2,
    pub volume: Volume,
    pub mass: f32,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub bounce_dampening: Option<f32>,
    pub immovable: bool,
    pub min_position: Option<Vector2>,
    pub max_position: Option<Vector2>,
    pub max_velocity: Option<Vector2>,
    pub collidable: bool,
    pub affected_by_gravity: bool,
    pub bouncy: bool,
    pub fill: String,
    pub kind: BodyKind,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            position: Vector2::new(20.0, 20.0),
            volume: Volume::new(50.0, 50.0),
            mass: 50.0,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            bounce_dampening: None,
            immovable: false,
            min_position: None,
            max_position: None,
            max_velocity: None,
            collidable: true,
            affected_by_gravity: true,
            bouncy: true,
            fill: "#1ce91f".to_string(),
            kind: BodyKind::Generic,
        }
    }
}

impl BodyDesc {
    /// Movable rectangle at `(x, y)` with the default look and restitution.
    pub fn rect(x: f32, y: f32, w: f32, h: f32, mass: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            volume: Volume::new(w, h),
            mass,
            ..Self::default()
        }
    }

    /// Immovable obstacle, e.g. a platform or wall.
    pub fn platform(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            immovable: true,
            affected_by_gravity: false,
            kind: BodyKind::Platform,
            fill: "black".to_string(),
            ..Self::rect(x, y, w, h, 500.0)
        }
    }

    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vector2::new(x, y);
        self
    }

    pub fn with_bounce_dampening(mut self, d: f32) -> Self {
        self.bounce_dampening = Some(d);
        self
    }

    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Rigid body - a non-rotating axis-aligned rectangle
#[derive(Debug, PartialEq)]
pub struct Body {
    uid: u32,
    mass: f32,
    immovable: bool,

    // === Physics State ===
    /// Top-left corner in world coordinates
    pub position: Vector2,
    pub volume: Volume,
    /// Units per simulated frame
    pub velocity: Vector2,
    /// Reset to zero after every integration
    pub acceleration: Vector2,

    // === Material properties ===
    /// Restitution override; `None` uses the world's value
    pub bounce_dampening: Option<f32>,
    pub max_velocity: Option<Vector2>,

    // === Behaviour flags ===
    pub collidable: bool,
    pub affected_by_gravity: bool,
    pub bouncy: bool,

    // === Clamp bounds (override the world rectangle) ===
    pub min_position: Option<Vector2>,
    pub max_position: Option<Vector2>,

    // === Render tags ===
    pub fill: String,
    pub kind: BodyKind,
}

impl Clone for Body {
    fn clone(&self) -> Self {
        Self {
            fill: self.fill.clone(),
            ..*self
        }
    }

    /// Reuses `fill`'s allocation, so refreshing a scratch copy each step
    /// does not reallocate render tags.
    fn clone_from(&mut self, source: &Self) {
        let fill = std::mem::take(&mut self.fill);
        *self = Self { fill, ..*source };
        self.fill.clone_from(&source.fill);
    }
}

fn validate_mass(mass: f32, immovable: bool) -> PhysicsResult<()> {
    let ok = if immovable {
        mass.is_finite() && mass >= 0.0
    } else {
        mass.is_finite() && mass > 0.0
    };
    if ok {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass { mass })
    }
}

/// Position, velocity, acceleration and forces must be finite.
pub(crate) fn require_finite(what: &str, v: Vector2) -> PhysicsResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidConfig(format!(
            "{} must be finite, got ({}, {})",
            what, v.x, v.y
        )))
    }
}

/// Limits may be infinite (unbounded) but never NaN.
fn require_limit(what: &str, v: Option<Vector2>) -> PhysicsResult<()> {
    match v {
        Some(v) if v.x.is_nan() || v.y.is_nan() => Err(PhysicsError::InvalidConfig(format!(
            "{} must not be NaN, got ({}, {})",
            what, v.x, v.y
        ))),
        _ => Ok(()),
    }
}

impl Body {
    pub fn new(uid: u32, desc: BodyDesc) -> PhysicsResult<Self> {
        validate_mass(desc.mass, desc.immovable)?;
        let Volume { width, height } = desc.volume;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "volume must be finite and non-negative, got {}x{}",
                width, height
            )));
        }
        require_finite("position", desc.position)?;
        require_finite("velocity", desc.velocity)?;
        require_finite("acceleration", desc.acceleration)?;
        require_limit("maxVelocity", desc.max_velocity)?;
        require_limit("minPosition", desc.min_position)?;
        require_limit("maxPosition", desc.max_position)?;
        if desc.bounce_dampening.is_some_and(f32::is_nan) {
            return Err(PhysicsError::InvalidConfig("bounceDampening is NaN".to_string()));
        }

        Ok(Self {
            uid,
            mass: desc.mass,
            immovable: desc.immovable,
            position: desc.position,
            volume: desc.volume,
            velocity: desc.velocity,
            acceleration: desc.acceleration,
            bounce_dampening: desc.bounce_dampening.map(|d| d.clamp(0.0, 1.0)),
            max_velocity: desc.max_velocity,
            collidable: desc.collidable,
            affected_by_gravity: desc.affected_by_gravity,
            bouncy: desc.bouncy,
            min_position: desc.min_position,
            max_position: desc.max_position,
            fill: desc.fill,
            kind: desc.kind,
        })
    }

    pub fn uid(&self) -> u32 {
        self.uid
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn is_immovable(&self) -> bool {
        self.immovable
    }

    pub fn set_mass(&mut self, mass: f32) -> PhysicsResult<()> {
        validate_mass(mass, self.immovable)?;
        self.mass = mass;
        Ok(())
    }

    /// Making a body movable again requires its mass to be usable as a divisor.
    pub fn set_immovable(&mut self, immovable: bool) -> PhysicsResult<()> {
        validate_mass(self.mass, immovable)?;
        self.immovable = immovable;
        Ok(())
    }

    /// Restitution in effect for this body.
    pub fn dampening_or(&self, world_default: f32) -> f32 {
        self.bounce_dampening.unwrap_or(world_default)
    }

    /// Accumulate `f / mass` into acceleration. Velocity and position are untouched.
    pub fn apply_force(&mut self, force: Vector2) -> PhysicsResult<()> {
        require_finite("force", force)?;
        if self.immovable {
            return Ok(());
        }
        self.acceleration += force.divide(self.mass)?;
        Ok(())
    }

    /// Gravity is an acceleration, independent of mass.
    pub fn apply_gravity(&mut self, g: f32) {
        if self.immovable || !self.affected_by_gravity {
            return;
        }
        self.acceleration.y += g;
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity.
    pub fn integrate(&mut self, dt: f32) {
        if !self.immovable {
            self.velocity += self.acceleration * dt;
            if let Some(max) = self.max_velocity {
                self.velocity.x = cap(self.velocity.x, max.x);
                self.velocity.y = cap(self.velocity.y, max.y);
            }
            self.position += self.velocity * dt;
        }
        self.acceleration = Vector2::zero();
    }

    pub fn bounds(&self) -> Aabb {
        let Vector2 { x, y } = self.position;
        Aabb {
            left: x,
            right: x + self.volume.width,
            top: y,
            bottom: y + self.volume.height,
        }
    }

    /// Keep the rectangle inside `[min, max]` on each axis independently.
    ///
    /// A bounded axis that was violated has its velocity reflected and
    /// scaled by `dampening` (only for bouncy bodies). Missing bounds and
    /// infinite components mean "unbounded". Returns whether anything was
    /// clamped.
    pub fn clamp_to_bounds(
        &mut self,
        min: Option<Vector2>,
        max: Option<Vector2>,
        dampening: f32,
    ) -> bool {
        if self.immovable {
            return false;
        }

        let Volume { width, height } = self.volume;
        let (x_clamped, x) = clamp_axis(
            self.position.x,
            width,
            min.map(|m| m.x),
            max.map(|m| m.x),
        );
        let (y_clamped, y) = clamp_axis(
            self.position.y,
            height,
            min.map(|m| m.y),
            max.map(|m| m.y),
        );

        self.position = Vector2::new(x, y);
        if self.bouncy {
            if x_clamped {
                self.velocity.x = -self.velocity.x * dampening;
            }
            if y_clamped {
                self.velocity.y = -self.velocity.y * dampening;
            }
        }
        x_clamped || y_clamped
    }
}

/// `f32::max`/`min` ignore a NaN limit where `clamp` would panic.
fn cap(v: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    v.max(-limit).min(limit)
}

/// Clamp one axis. When the span is smaller than the body the min edge wins.
fn clamp_axis(pos: f32, extent: f32, min: Option<f32>, max: Option<f32>) -> (bool, f32) {
    let over_max = max.is_some_and(|m| pos + extent > m);
    let under_min = min.is_some_and(|m| pos < m);
    let mut out = pos;
    if let (true, Some(m)) = (over_max, max) {
        out = m - extent;
    }
    if let (true, Some(m)) = (under_min, min) {
        out = m;
    }
    (over_max || under_min, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(desc: BodyDesc) -> Body {
        Body::new(1, desc).unwrap()
    }

    #[test]
    fn movable_body_rejects_non_positive_mass() {
        assert_eq!(
            Body::new(1, BodyDesc::rect(0.0, 0.0, 1.0, 1.0, 0.0)).unwrap_err(),
            PhysicsError::InvalidMass { mass: 0.0 }
        );
        assert!(Body::new(1, BodyDesc::rect(0.0, 0.0, 1.0, 1.0, -3.0)).is_err());
        assert!(Body::new(1, BodyDesc::rect(0.0, 0.0, 1.0, 1.0, f32::NAN)).is_err());
    }

    #[test]
    fn non_finite_motion_state_is_rejected() {
        let nan_cap = BodyDesc {
            max_velocity: Some(Vector2::new(f32::NAN, 10.0)),
            ..BodyDesc::default()
        };
        assert!(matches!(Body::new(1, nan_cap), Err(PhysicsError::InvalidConfig(_))));

        let runaway = BodyDesc::default().with_velocity(f32::INFINITY, 0.0);
        assert!(matches!(Body::new(1, runaway), Err(PhysicsError::InvalidConfig(_))));

        let kicked = BodyDesc {
            acceleration: Vector2::new(0.0, f32::NAN),
            ..BodyDesc::default()
        };
        assert!(Body::new(1, kicked).is_err());

        let fence = BodyDesc {
            min_position: Some(Vector2::new(f32::NAN, 0.0)),
            ..BodyDesc::default()
        };
        assert!(Body::new(1, fence).is_err());
        assert!(Body::new(1, BodyDesc::default().with_bounce_dampening(f32::NAN)).is_err());
    }

    #[test]
    fn infinite_velocity_cap_means_uncapped() {
        let mut b = body(BodyDesc {
            max_velocity: Some(Vector2::new(f32::INFINITY, 2.0)),
            ..BodyDesc::rect(0.0, 0.0, 10.0, 10.0, 1.0)
        });
        b.acceleration = Vector2::new(50.0, 50.0);
        b.integrate(1.0);
        assert_eq!(b.velocity, Vector2::new(50.0, 2.0));

        // a cap poisoned after construction is ignored rather than panicking
        b.max_velocity = Some(Vector2::new(f32::NAN, 1.0));
        b.integrate(1.0);
        assert_eq!(b.velocity, Vector2::new(50.0, 1.0));
    }

    #[test]
    fn non_finite_force_is_rejected() {
        let mut b = body(BodyDesc::rect(0.0, 0.0, 10.0, 10.0, 4.0));
        assert!(matches!(
            b.apply_force(Vector2::new(f32::INFINITY, 0.0)),
            Err(PhysicsError::InvalidConfig(_))
        ));
        assert_eq!(b.acceleration, Vector2::zero());
    }

    #[test]
    fn immovable_body_may_be_massless_until_released() {
        let mut b = body(BodyDesc { mass: 0.0, ..BodyDesc::platform(0.0, 0.0, 10.0, 10.0) });
        assert!(matches!(b.set_immovable(false), Err(PhysicsError::InvalidMass { .. })));
        assert!(b.is_immovable());
        b.set_mass(5.0).unwrap();
        b.set_immovable(false).unwrap();
        assert!(matches!(b.set_mass(0.0), Err(PhysicsError::InvalidMass { .. })));
    }

    #[test]
    fn apply_force_divides_by_mass_and_only_touches_acceleration() {
        let mut b = body(BodyDesc::rect(0.0, 0.0, 10.0, 10.0, 4.0));
        b.apply_force(Vector2::new(8.0, -2.0)).unwrap();
        assert_eq!(b.acceleration, Vector2::new(2.0, -0.5));
        assert_eq!(b.velocity, Vector2::zero());
        assert_eq!(b.position, Vector2::zero());
    }

    #[test]
    fn integrate_uses_updated_velocity_for_position() {
        let mut b = body(BodyDesc::rect(0.0, 0.0, 10.0, 10.0, 1.0).with_velocity(1.0, 0.0));
        b.acceleration = Vector2::new(2.0, 3.0);
        b.integrate(0.5);
        assert_eq!(b.velocity, Vector2::new(2.0, 1.5));
        assert_eq!(b.position, Vector2::new(1.0, 0.75));
        assert_eq!(b.acceleration, Vector2::zero());
    }

    #[test]
    fn integrate_respects_max_velocity() {
        let mut b = body(BodyDesc {
            max_velocity: Some(Vector2::new(8.0, 10.0)),
            ..BodyDesc::rect(0.0, 0.0, 10.0, 10.0, 1.0)
        });
        b.acceleration = Vector2::new(-100.0, 100.0);
        b.integrate(1.0);
        assert_eq!(b.velocity, Vector2::new(-8.0, 10.0));
    }

    #[test]
    fn immovable_body_ignores_forces_and_integration() {
        let mut b = body(BodyDesc::platform(5.0, 5.0, 10.0, 10.0).with_velocity(3.0, 3.0));
        b.apply_force(Vector2::new(100.0, 100.0)).unwrap();
        b.apply_gravity(9.0);
        b.integrate(1.0);
        assert_eq!(b.position, Vector2::new(5.0, 5.0));
        assert_eq!(b.velocity, Vector2::new(3.0, 3.0));
    }

    #[test]
    fn clone_from_copies_state_into_existing_body() {
        let src = body(BodyDesc::platform(5.0, 6.0, 7.0, 8.0).with_velocity(1.0, 2.0));
        let mut dst = Body::new(9, BodyDesc::default()).unwrap();
        dst.clone_from(&src);
        assert_eq!(dst, src);
        assert_eq!(dst.uid(), 1);
        assert!(dst.is_immovable());
        assert_eq!(dst.fill, "black");
    }

    #[test]
    fn bounds_follow_position_and_volume() {
        let b = body(BodyDesc::rect(10.0, 20.0, 30.0, 40.0, 1.0));
        assert_eq!(
            b.bounds(),
            Aabb { left: 10.0, right: 40.0, top: 20.0, bottom: 60.0 }
        );
    }

    #[test]
    fn clamp_reflects_each_violated_axis() {
        let mut b = body(BodyDesc::rect(95.0, -5.0, 10.0, 10.0, 1.0).with_velocity(4.0, -6.0));
        let hit = b.clamp_to_bounds(
            Some(Vector2::zero()),
            Some(Vector2::new(100.0, 100.0)),
            0.5,
        );
        assert!(hit);
        assert_eq!(b.position, Vector2::new(90.0, 0.0));
        assert_eq!(b.velocity, Vector2::new(-2.0, 3.0));
    }

    #[test]
    fn clamp_without_bounds_or_bounce() {
        let mut b = body(BodyDesc {
            bouncy: false,
            ..BodyDesc::rect(-50.0, 500.0, 10.0, 10.0, 1.0).with_velocity(-1.0, 1.0)
        });
        assert!(!b.clamp_to_bounds(None, None, 0.5));
        assert!(b.clamp_to_bounds(None, Some(Vector2::new(f32::INFINITY, 100.0)), 0.5));
        assert_eq!(b.position, Vector2::new(-50.0, 90.0));
        assert_eq!(b.velocity, Vector2::new(-1.0, 1.0));
    }

    #[test]
    fn desc_json_uses_defaults_for_missing_fields() {
        let desc = BodyDesc::from_json(r#"{"position":{"x":1,"y":2},"kind":"player"}"#).unwrap();
        assert_eq!(desc.position, Vector2::new(1.0, 2.0));
        assert_eq!(desc.mass, 50.0);
        assert_eq!(desc.kind, BodyKind::Player);
        assert!(desc.collidable);
    }
}
