#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure kinematics system integrating the gardener's motion on a toroidal board.

use garden_core::{Actor, DirectionKeys};
use glam::Vec2;

/// Integrates one frame of motion and returns the updated actor.
///
/// `delta` is the elapsed time in frames and `extent` the side length of the
/// board in pixels. The acceleration impulse `acceleration * delta` is added
/// per held direction, then the velocity is damped by `friction / delta`.
/// The position advances with the velocity held at the start of the frame
/// and wraps around both axes into `[0, extent)`.
///
/// A non-positive or non-finite `delta` leaves the actor untouched, and a
/// velocity component that overflows to a non-finite value stops at `0`.
#[must_use]
pub fn integrate(actor: &Actor, delta: f32, keys: DirectionKeys, extent: f32) -> Actor {
    if !(delta.is_finite() && delta > 0.0) {
        return *actor;
    }

    let impulse = actor.acceleration * delta;
    let mut acceleration_change = Vec2::ZERO;
    if keys.up {
        acceleration_change.y -= impulse;
    }
    if keys.down {
        acceleration_change.y += impulse;
    }
    if keys.left {
        acceleration_change.x -= impulse;
    }
    if keys.right {
        acceleration_change.x += impulse;
    }

    let position = wrap_position(actor.position + actor.velocity * delta, extent);
    let velocity = (actor.velocity + acceleration_change) * (actor.friction / delta);
    let velocity = Vec2::new(finite_or_zero(velocity.x), finite_or_zero(velocity.y));

    Actor {
        position,
        velocity,
        ..*actor
    }
}

/// Wraps a position into `[0, extent)` on both axes.
#[must_use]
pub fn wrap_position(position: Vec2, extent: f32) -> Vec2 {
    Vec2::new(wrap_axis(position.x, extent), wrap_axis(position.y, extent))
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if !value.is_finite() || !(extent.is_finite() && extent > 0.0) {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid may round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::ActorId;

    fn actor(position: Vec2, velocity: Vec2) -> Actor {
        Actor {
            velocity,
            ..Actor::at_rest(ActorId::new(0), position, 0.4, 0.94)
        }
    }

    #[test]
    fn wrap_axis_folds_both_edges() {
        assert_eq!(wrap_axis(610.0, 600.0), 10.0);
        assert_eq!(wrap_axis(-10.0, 600.0), 590.0);
        assert_eq!(wrap_axis(600.0, 600.0), 0.0);
        assert_eq!(wrap_axis(-1e-9, 600.0), 0.0);
        assert_eq!(wrap_axis(1250.0, 600.0), 50.0);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let start = actor(Vec2::new(10.0, 10.0), Vec2::new(3.0, 0.0));
        assert_eq!(integrate(&start, 0.0, DirectionKeys::RELEASED, 600.0), start);
        assert_eq!(
            integrate(&start, f32::NAN, DirectionKeys::RELEASED, 600.0),
            start
        );
    }

    #[test]
    fn position_uses_velocity_from_start_of_frame() {
        let start = actor(Vec2::new(100.0, 100.0), Vec2::new(2.0, -1.0));
        let keys = DirectionKeys {
            right: true,
            ..DirectionKeys::RELEASED
        };
        let next = integrate(&start, 1.0, keys, 600.0);
        assert_eq!(next.position, Vec2::new(102.0, 99.0));
        assert!((next.velocity.x - (2.0 + 0.4) * 0.94).abs() < 1e-6);
        assert!((next.velocity.y - (-1.0 * 0.94)).abs() < 1e-6);
    }

    #[test]
    fn overflowing_velocity_stops_instead_of_pinning() {
        let start = actor(Vec2::new(100.0, 100.0), Vec2::new(f32::MAX, 2.0));
        let tiny_delta = 1e-3;

        let next = integrate(&start, tiny_delta, DirectionKeys::RELEASED, 600.0);
        assert_eq!(next.velocity.x, 0.0);
        assert!(next.velocity.y.is_finite());

        let after = integrate(&next, 1.0, DirectionKeys::RELEASED, 600.0);
        assert_eq!(after.position.x, next.position.x);
        assert!(after.velocity.is_finite());
    }
}
