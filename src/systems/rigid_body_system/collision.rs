//! Pure AABB collision helpers: overlap test, 1-D elastic velocity exchange
//! per axis, and minimum-penetration position correction.

use crate::common::{PhysicsError, PhysicsResult};
use crate::rigid_body::{Aabb, Vector2};

/// Side of `b` that `a` gets pushed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Strict overlap: touching edges do not collide.
#[inline]
pub fn check_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

/// Elastic collision on each axis, then scaled by each body's restitution.
///
/// Masses are used as-is, immovable bodies included; the caller decides who
/// actually receives the result. Returns the inputs untouched if the total
/// mass is zero.
pub fn resolve_velocities(
    m1: f32,
    m2: f32,
    v1: Vector2,
    v2: Vector2,
    damp1: f32,
    damp2: f32,
) -> (Vector2, Vector2) {
    let total = m1 + m2;
    if total == 0.0 {
        return (v1, v2);
    }
    let axis = |a: f32, b: f32, ma: f32, mb: f32| (a * (ma - mb) + 2.0 * mb * b) / total;

    let v1_out = Vector2::new(axis(v1.x, v2.x, m1, m2), axis(v1.y, v2.y, m1, m2)) * damp1;
    let v2_out = Vector2::new(axis(v2.x, v1.x, m2, m1), axis(v2.y, v1.y, m2, m1)) * damp2;
    (v1_out, v2_out)
}

/// Distances from each of `a`'s sides to the opposing side of `b`.
fn penetration(a: &Aabb, b: &Aabb) -> [(Side, f32); 4] {
    [
        (Side::Left, (b.left - a.right).abs()),
        (Side::Right, (b.right - a.left).abs()),
        (Side::Top, (b.top - a.bottom).abs()),
        (Side::Bottom, (b.bottom - a.top).abs()),
    ]
}

/// Side of `b` with the smallest penetration. Ties keep declaration order.
pub fn separation_side(a: &Aabb, b: &Aabb) -> PhysicsResult<Side> {
    let mut best: Option<(Side, f32)> = None;
    for (side, dist) in penetration(a, b) {
        if !dist.is_finite() {
            continue;
        }
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((side, dist)),
        }
    }
    best.map(|(side, _)| side)
        .ok_or(PhysicsError::UnreachableInvariant("no minimal side found"))
}

/// New top-left for `a` so that it just touches `b` on the least-penetrated side.
///
/// Deep or fast overlaps may pick a visually wrong side; this is the
/// accepted cost of the heuristic.
pub fn resolve_position(a: &Aabb, b: &Aabb) -> PhysicsResult<Vector2> {
    let pos = match separation_side(a, b)? {
        Side::Left => Vector2::new(b.left - a.width(), a.top),
        Side::Right => Vector2::new(b.right, a.top),
        Side::Top => Vector2::new(a.left, b.top - a.height()),
        Side::Bottom => Vector2::new(a.left, b.bottom),
    };
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb { left: x, right: x + w, top: y, bottom: y + h }
    }

    fn moved(a: &Aabb, to: Vector2) -> Aabb {
        aabb(to.x, to.y, a.width(), a.height())
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (aabb(0.0, 0.0, 10.0, 10.0), aabb(5.0, 5.0, 10.0, 10.0)),
            (aabb(0.0, 0.0, 10.0, 10.0), aabb(20.0, 0.0, 10.0, 10.0)),
            (aabb(0.0, 0.0, 100.0, 5.0), aabb(50.0, -50.0, 5.0, 100.0)),
            (aabb(0.0, 0.0, 10.0, 10.0), aabb(10.0, 0.0, 10.0, 10.0)),
        ];
        for (a, b) in cases {
            assert_eq!(check_overlap(&a, &b), check_overlap(&b, &a));
        }
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        assert!(!check_overlap(&a, &aabb(10.0, 0.0, 10.0, 10.0)));
        assert!(!check_overlap(&a, &aabb(0.0, 10.0, 10.0, 10.0)));
        assert!(check_overlap(&a, &aabb(9.9, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn equal_masses_swap_velocities() {
        let (v1, v2) = resolve_velocities(
            50.0,
            50.0,
            Vector2::new(5.0, 0.0),
            Vector2::new(-5.0, 0.0),
            1.0,
            1.0,
        );
        assert_eq!(v1, Vector2::new(-5.0, 0.0));
        assert_eq!(v2, Vector2::new(5.0, 0.0));
    }

    #[test]
    fn restitution_scales_each_result_independently() {
        let (v1, v2) = resolve_velocities(
            1.0,
            1.0,
            Vector2::new(0.0, 4.0),
            Vector2::new(0.0, -4.0),
            0.5,
            0.25,
        );
        assert_eq!(v1, Vector2::new(0.0, -2.0));
        assert_eq!(v2, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn heavy_body_barely_notices_light_one() {
        let (v1, v2) = resolve_velocities(
            1.0,
            999.0,
            Vector2::new(10.0, 0.0),
            Vector2::zero(),
            1.0,
            1.0,
        );
        assert!(v1.x < -9.9);
        assert!(v2.x > 0.0 && v2.x < 0.1);
    }

    #[test]
    fn zero_total_mass_is_guarded() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(resolve_velocities(0.0, 0.0, v, -v, 1.0, 1.0), (v, -v));
    }

    #[test]
    fn picks_side_of_least_penetration() {
        let floor = aabb(0.0, 100.0, 200.0, 20.0);
        // sinks 3 units into the floor's top
        let a = aabb(50.0, 53.0, 50.0, 50.0);
        assert_eq!(separation_side(&a, &floor).unwrap(), Side::Top);
        assert_eq!(resolve_position(&a, &floor).unwrap(), Vector2::new(50.0, 50.0));

        let wall = aabb(100.0, 0.0, 20.0, 200.0);
        let b = aabb(52.0, 10.0, 50.0, 50.0);
        assert_eq!(resolve_position(&b, &wall).unwrap(), Vector2::new(50.0, 10.0));
        let c = aabb(118.0, 10.0, 50.0, 50.0);
        assert_eq!(resolve_position(&c, &wall).unwrap(), Vector2::new(120.0, 10.0));
        let d = aabb(0.0, 118.0, 50.0, 50.0);
        assert_eq!(resolve_position(&d, &floor).unwrap(), Vector2::new(0.0, 120.0));
    }

    #[test]
    fn ties_prefer_left_then_right_then_top() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        let b = aabb(0.0, 0.0, 10.0, 10.0);
        // all four distances are 10
        assert_eq!(separation_side(&a, &b).unwrap(), Side::Left);
    }

    #[test]
    fn resolving_clears_the_overlap() {
        let b = aabb(40.0, 40.0, 30.0, 30.0);
        for a in [
            aabb(15.0, 45.0, 30.0, 10.0),
            aabb(65.0, 45.0, 30.0, 10.0),
            aabb(45.0, 20.0, 10.0, 25.0),
            aabb(45.0, 65.0, 10.0, 25.0),
            aabb(38.0, 38.0, 5.0, 5.0),
        ] {
            assert!(check_overlap(&a, &b));
            let fixed = moved(&a, resolve_position(&a, &b).unwrap());
            assert!(!check_overlap(&fixed, &b), "{:?} still overlaps", fixed);
        }
    }

    #[test]
    fn non_finite_geometry_is_an_invariant_violation() {
        let nan = aabb(f32::NAN, f32::NAN, 1.0, 1.0);
        let b = aabb(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            resolve_position(&nan, &b),
            Err(PhysicsError::UnreachableInvariant("no minimal side found"))
        );
    }
}
