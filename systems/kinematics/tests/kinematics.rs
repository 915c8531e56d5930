use garden_core::{Actor, ActorId, DirectionKeys};
use garden_system_kinematics::integrate;
use glam::Vec2;

const EXTENT: f32 = 600.0;

fn key_combinations() -> Vec<DirectionKeys> {
    (0u8..16)
        .map(|mask| DirectionKeys {
            up: mask & 1 != 0,
            down: mask & 2 != 0,
            left: mask & 4 != 0,
            right: mask & 8 != 0,
        })
        .collect()
}

#[test]
fn position_stays_on_board_for_every_delta_and_start() {
    let deltas = [0.01, 0.5, 1.0, 1.7, 3.0, 12.5, 60.0];
    let starts = [0.0, 0.001, 299.5, 599.0, 599.999];
    let velocities = [-5000.0, -601.0, -3.0, 0.0, 2.5, 600.0, 12_345.0];

    for &delta in &deltas {
        for &x in &starts {
            for &y in &starts {
                for &vx in &velocities {
                    for keys in key_combinations() {
                        let actor = Actor {
                            velocity: Vec2::new(vx, -vx),
                            ..Actor::at_rest(ActorId::new(1), Vec2::new(x, y), 0.4, 0.94)
                        };
                        let next = integrate(&actor, delta, keys, EXTENT);
                        for axis in [next.position.x, next.position.y] {
                            assert!(
                                (0.0..EXTENT).contains(&axis),
                                "axis {axis} escaped the board (delta {delta}, start {x},{y}, v {vx})"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn repeated_frames_never_escape_the_board() {
    let keys = DirectionKeys {
        up: true,
        left: true,
        ..DirectionKeys::RELEASED
    };
    let mut actor = Actor::at_rest(ActorId::new(0), Vec2::new(200.0, 150.0), 0.4, 0.94);
    for _ in 0..5_000 {
        actor = integrate(&actor, 1.0, keys, EXTENT);
        assert!((0.0..EXTENT).contains(&actor.position.x));
        assert!((0.0..EXTENT).contains(&actor.position.y));
    }
}

#[test]
fn diagonal_impulses_combine_additively() {
    let keys = DirectionKeys {
        down: true,
        right: true,
        ..DirectionKeys::RELEASED
    };
    let actor = Actor::at_rest(ActorId::new(0), Vec2::new(10.0, 10.0), 0.4, 0.94);
    let next = integrate(&actor, 1.0, keys, EXTENT);
    assert!((next.velocity.x - 0.4 * 0.94).abs() < 1e-6);
    assert!((next.velocity.y - 0.4 * 0.94).abs() < 1e-6);
    assert_eq!(next.position, actor.position);
}

#[test]
fn opposite_keys_cancel() {
    let keys = DirectionKeys {
        up: true,
        down: true,
        left: true,
        right: true,
    };
    let actor = Actor::at_rest(ActorId::new(0), Vec2::new(10.0, 10.0), 0.4, 0.94);
    let next = integrate(&actor, 2.0, keys, EXTENT);
    assert_eq!(next.velocity, Vec2::ZERO);
}

#[test]
fn damping_divides_friction_by_delta() {
    let actor = Actor {
        velocity: Vec2::new(4.0, 0.0),
        ..Actor::at_rest(ActorId::new(0), Vec2::new(10.0, 10.0), 0.4, 0.94)
    };
    let next = integrate(&actor, 2.0, DirectionKeys::RELEASED, EXTENT);
    assert!((next.velocity.x - 4.0 * 0.47).abs() < 1e-6);
    assert_eq!(next.position, Vec2::new(18.0, 10.0));
    assert_eq!(next.id, actor.id);
}

#[test]
fn leaving_an_edge_re_enters_at_the_opposite_edge() {
    let actor = Actor {
        velocity: Vec2::new(-15.0, 20.0),
        ..Actor::at_rest(ActorId::new(0), Vec2::new(5.0, 590.0), 0.4, 0.94)
    };
    let next = integrate(&actor, 1.0, DirectionKeys::RELEASED, EXTENT);
    assert_eq!(next.position, Vec2::new(590.0, 10.0));
}
