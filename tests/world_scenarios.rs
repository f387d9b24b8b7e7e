use boxsim_engine::{BodyDesc, Vector2, WorldCommand, WorldCore};

/// A box dropped onto a platform comes to rest on top of it.
#[test]
fn box_settles_on_platform() {
    let mut world = WorldCore::from_config_json(r#"{"gravity": 1, "bounceDampening": 0.3}"#).unwrap();
    let floor = world.add_body(BodyDesc::platform(0.0, 300.0, 900.0, 50.0)).unwrap();
    let crate_id = world.add_body(BodyDesc::rect(400.0, 100.0, 50.0, 50.0, 50.0)).unwrap();

    for _ in 0..400 {
        world.step(1.0).unwrap();
    }

    let b = world.body(crate_id).unwrap();
    let top = world.body(floor).unwrap().bounds().top;
    assert!((b.bounds().bottom - top).abs() < 1.5, "resting at {:?}", b.position);
    assert!(b.velocity.y.abs() < 1.5);
    assert_eq!(b.position.x, 400.0);
}

/// Clamping keeps bodies inside the world rectangle. Collision pushes run
/// after clamping, so these bodies opt out of collisions.
#[test]
fn bodies_stay_inside_world_bounds() {
    let mut world = WorldCore::new(300.0, 200.0).unwrap();
    world.set_gravity(5.0).unwrap();
    let ids: Vec<u32> = [(-20.0, 10.0, 30.0, 0.0), (250.0, 150.0, 40.0, 12.0), (100.0, 50.0, -25.0, -40.0)]
        .iter()
        .map(|&(x, y, vx, vy)| {
            world
                .add_body(BodyDesc {
                    collidable: false,
                    ..BodyDesc::rect(x, y, 40.0, 40.0, 10.0).with_velocity(vx, vy)
                })
                .unwrap()
        })
        .collect();

    for _ in 0..100 {
        world.step(1.0).unwrap();
        for id in &ids {
            let b = world.body(*id).unwrap().bounds();
            assert!(b.left >= 0.0 && b.right <= 300.0, "x out of bounds: {:?}", b);
            assert!(b.top >= 0.0 && b.bottom <= 200.0, "y out of bounds: {:?}", b);
        }
    }
}

/// A per-body bound narrower than the world wins.
#[test]
fn per_body_bounds_override_world() {
    let mut world = WorldCore::new(900.0, 450.0).unwrap();
    let id = world
        .add_body(BodyDesc {
            max_position: Some(Vector2::new(900.0, 200.0)),
            ..BodyDesc::rect(0.0, 0.0, 50.0, 50.0, 10.0)
        })
        .unwrap();
    for _ in 0..50 {
        world.step(1.0).unwrap();
        assert!(world.body(id).unwrap().bounds().bottom <= 200.0);
    }
}

/// Inverted gravity pushes bodies against the ceiling.
#[test]
fn negative_gravity_lifts_bodies() {
    let mut world = WorldCore::new(900.0, 450.0).unwrap();
    world.set_gravity(-4.0).unwrap();
    let id = world.add_body(BodyDesc::rect(10.0, 200.0, 20.0, 20.0, 1.0)).unwrap();
    for _ in 0..100 {
        world.step(1.0).unwrap();
    }
    assert!(world.body(id).unwrap().position.y < 5.0);
}

/// Same inputs, same outputs.
#[test]
fn simulation_is_deterministic() {
    let run = || {
        let mut world = WorldCore::new(600.0, 400.0).unwrap();
        for i in 0..12 {
            let f = i as f32;
            world
                .add_body(
                    BodyDesc::rect(20.0 + f * 45.0, 10.0 + (f * 37.0) % 200.0, 30.0, 30.0, 5.0 + f)
                        .with_velocity(3.0 - f * 0.5, 0.0),
                )
                .unwrap();
        }
        world.enqueue(WorldCommand::SetBounceDampening { bounce_dampening: 0.8 });
        for _ in 0..120 {
            world.step(0.5).unwrap();
        }
        world.snapshot()
    };
    assert_eq!(run(), run());
}
