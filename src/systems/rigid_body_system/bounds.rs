use crate::rigid_body::{Body, Vector2};

/// Clamp rectangle for a body: its own limits win over the world's.
pub(super) fn clamp_limits(body: &Body, world_min: Vector2, world_max: Vector2) -> (Vector2, Vector2) {
    (
        body.min_position.unwrap_or(world_min),
        body.max_position.unwrap_or(world_max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::BodyDesc;

    #[test]
    fn body_limits_override_world_rectangle() {
        let world = (Vector2::zero(), Vector2::new(900.0, 450.0));
        let plain = Body::new(1, BodyDesc::default()).unwrap();
        assert_eq!(clamp_limits(&plain, world.0, world.1), world);

        let fenced = Body::new(
            2,
            BodyDesc {
                max_position: Some(Vector2::new(100.0, 100.0)),
                ..BodyDesc::default()
            },
        )
        .unwrap();
        assert_eq!(
            clamp_limits(&fenced, world.0, world.1),
            (Vector2::zero(), Vector2::new(100.0, 100.0))
        );
    }
}
