use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Continuous kinematic state of the gardener.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the actor.
    pub id: ActorId,
    /// Position in pixels, kept within the board extent on both axes.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Base acceleration applied per held direction.
    pub acceleration: f32,
    /// Damping factor in `(0, 1)`.
    pub friction: f32,
}

impl Actor {
    /// Creates a resting actor at the provided position.
    #[must_use]
    pub const fn at_rest(id: ActorId, position: Vec2, acceleration: f32, friction: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            acceleration,
            friction,
        }
    }
}
