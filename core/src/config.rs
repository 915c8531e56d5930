use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Nursery, PitchClass, PlantColor};

/// Fastest selectable timescale; larger values shorten the beat interval.
pub const MIN_TIMESCALE: u32 = 50;
/// Slowest-to-fastest upper bound of the timescale slider.
pub const MAX_TIMESCALE: u32 = 250;
/// Timescale used when none is configured.
pub const DEFAULT_TIMESCALE: u32 = 150;
/// Largest accepted number of rows (and columns) on the board.
pub const MAX_BOARD_SIZE: u32 = 4096;

const DEFAULT_BOARD_SIZE: u32 = 20;
const DEFAULT_PATCH_SIZE: f32 = 30.0;
const DEFAULT_FRAME_PERIOD_MS: f32 = 1000.0 / 60.0;
const DEFAULT_MATURITY_MS: f32 = 3000.0;
const DEFAULT_START_POSITION: Vec2 = Vec2::new(200.0, 150.0);
const DEFAULT_ACCELERATION: f32 = 0.4;
const DEFAULT_FRICTION: f32 = 0.94;

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The board must contain at least one cell.
    #[error("board size must be positive")]
    EmptyBoard,
    /// The board would not fit the cell index space.
    #[error("board size must not exceed {max} (received {received})")]
    BoardTooLarge {
        /// Rejected board size.
        received: u32,
        /// Largest accepted board size.
        max: u32,
    },
    /// Patches must have a positive, finite side length.
    #[error("patch size must be positive and finite (received {0})")]
    InvalidPatchSize(f32),
    /// The frame period must be positive and finite.
    #[error("frame period must be positive and finite (received {0} ms)")]
    InvalidFramePeriod(f32),
    /// The maturity duration must be positive and finite.
    #[error("maturity duration must be positive and finite (received {0} ms)")]
    InvalidMaturity(f32),
    /// Acceleration must be finite.
    #[error("acceleration must be finite (received {0})")]
    InvalidAcceleration(f32),
    /// Friction must lie strictly between zero and one.
    #[error("friction must lie in (0, 1) (received {0})")]
    InvalidFriction(f32),
    /// The gardener must start on the board.
    #[error("start position ({x}, {y}) lies outside the board")]
    StartOutsideBoard {
        /// Horizontal start coordinate in pixels.
        x: f32,
        /// Vertical start coordinate in pixels.
        y: f32,
    },
    /// The nursery must offer at least one instrument group.
    #[error("nursery has no instrument groups")]
    EmptyNursery,
    /// Every instrument group must offer at least one plant.
    #[error("instrument group `{name}` has no plants")]
    EmptyInstrumentGroup {
        /// Name of the offending group.
        name: String,
    },
    /// The note scale must contain at least one pitch class.
    #[error("scale has no pitch classes")]
    EmptyScale,
    /// Duration classes are limited to 1, 2, 4 and 8.
    #[error("duration class must be 1, 2, 4 or 8 (received {0})")]
    InvalidDurationClass(u32),
    /// Colors are `#rrggbb` or one of the supported names.
    #[error("unrecognised color `{0}`")]
    InvalidColor(String),
    /// Pitch classes are letter names with an optional sharp.
    #[error("unrecognised pitch class `{0}`")]
    InvalidPitchClass(String),
}

/// Initial kinematic parameters of the gardener.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Start position in pixels.
    pub start_position: Vec2,
    /// Base acceleration applied per held direction.
    pub acceleration: f32,
    /// Damping factor in `(0, 1)`.
    pub friction: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            start_position: DEFAULT_START_POSITION,
            acceleration: DEFAULT_ACCELERATION,
            friction: DEFAULT_FRICTION,
        }
    }
}

/// Explicit configuration threaded through the world, reducer and systems.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Number of rows and columns of the square board.
    pub board_size: u32,
    /// Side length of one cell in pixels.
    pub patch_size: f32,
    /// Wall-clock duration of one frame in milliseconds.
    pub frame_period_ms: f32,
    /// Wall-clock time a plant needs to mature, in milliseconds.
    pub maturity_ms: f32,
    /// Initial timescale slider value.
    pub timescale: u32,
    /// Gardener parameters.
    pub actor: ActorConfig,
    /// Color painted on cells without a plant.
    pub dead_color: PlantColor,
    /// Pitch classes assigned to rows, repeating downward.
    pub scale: Vec<PitchClass>,
    /// Plant catalog.
    pub nursery: Nursery,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            patch_size: DEFAULT_PATCH_SIZE,
            frame_period_ms: DEFAULT_FRAME_PERIOD_MS,
            maturity_ms: DEFAULT_MATURITY_MS,
            timescale: DEFAULT_TIMESCALE,
            actor: ActorConfig::default(),
            dead_color: PlantColor::BLACK,
            scale: vec![
                PitchClass::G,
                PitchClass::A,
                PitchClass::C,
                PitchClass::D,
                PitchClass::E,
                PitchClass::G,
            ],
            nursery: Nursery::default(),
        }
    }
}

impl GardenConfig {
    /// Age, in frames, at which a plant becomes mature.
    #[must_use]
    pub fn maturity_age(&self) -> f32 {
        self.maturity_ms / self.frame_period_ms
    }

    /// Side length of the board in pixels.
    #[must_use]
    pub fn board_extent(&self) -> f32 {
        self.board_size as f32 * self.patch_size
    }

    /// Checks every invariant the world relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                received: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if !is_positive(self.patch_size) {
            return Err(ConfigError::InvalidPatchSize(self.patch_size));
        }
        if !is_positive(self.frame_period_ms) {
            return Err(ConfigError::InvalidFramePeriod(self.frame_period_ms));
        }
        if !is_positive(self.maturity_ms) {
            return Err(ConfigError::InvalidMaturity(self.maturity_ms));
        }
        if !self.actor.acceleration.is_finite() {
            return Err(ConfigError::InvalidAcceleration(self.actor.acceleration));
        }
        if !(self.actor.friction > 0.0 && self.actor.friction < 1.0) {
            return Err(ConfigError::InvalidFriction(self.actor.friction));
        }

        let start = self.actor.start_position;
        let extent = self.board_extent();
        let on_board = |value: f32| value.is_finite() && (0.0..extent).contains(&value);
        if !on_board(start.x) || !on_board(start.y) {
            return Err(ConfigError::StartOutsideBoard {
                x: start.x,
                y: start.y,
            });
        }

        if self.nursery.is_empty() {
            return Err(ConfigError::EmptyNursery);
        }
        if let Some(group) = self
            .nursery
            .groups()
            .iter()
            .find(|group| group.options.is_empty())
        {
            return Err(ConfigError::EmptyInstrumentGroup {
                name: group.name.clone(),
            });
        }
        if self.scale.is_empty() {
            return Err(ConfigError::EmptyScale);
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = GardenConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!((config.maturity_age() - 180.0).abs() < 1e-3);
        assert!((config.board_extent() - 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn validation_rejects_degenerate_values() {
        let mut config = GardenConfig {
            board_size: 0,
            ..GardenConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBoard));

        config = GardenConfig {
            board_size: u32::MAX,
            ..GardenConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooLarge {
                received: u32::MAX,
                max: MAX_BOARD_SIZE,
            })
        );

        config = GardenConfig::default();
        config.actor.friction = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFriction(1.0)));

        config = GardenConfig::default();
        config.actor.start_position = Vec2::new(600.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutsideBoard { .. })
        ));

        config = GardenConfig {
            scale: Vec::new(),
            ..GardenConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyScale));

        config = GardenConfig {
            nursery: Nursery::new(Vec::new()),
            ..GardenConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyNursery));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: GardenConfig = toml::from_str(
            r##"
board_size = 12
scale = ["C", "D#", "G"]

[actor]
friction = 0.5

[[nursery]]
name = "Bells"
instrument = 3
options = [
    { duration_class = 2, color = "#102030" },
    { duration_class = 8, color = "lime" },
]
"##,
        )
        .expect("valid toml");

        assert_eq!(config.board_size, 12);
        assert_eq!(config.patch_size, DEFAULT_PATCH_SIZE);
        assert_eq!(config.actor.friction, 0.5);
        assert_eq!(config.actor.acceleration, DEFAULT_ACCELERATION);
        assert_eq!(
            config.scale,
            vec![PitchClass::C, PitchClass::DSharp, PitchClass::G]
        );
        assert_eq!(config.nursery.len(), 1);
        assert_eq!(config.nursery.option_count(0), 2);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn toml_with_unknown_duration_class_is_rejected() {
        let parsed: Result<GardenConfig, _> = toml::from_str(
            r##"
[[nursery]]
name = "Odd"
instrument = 0
options = [{ duration_class = 3, color = "#000000" }]
"##,
        );
        assert!(parsed.is_err());
    }
}
