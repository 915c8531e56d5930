#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the garden engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Action`] values
//! describing desired mutations, the world executes those actions through its
//! reducer, and then broadcasts [`Event`] values for systems to react to
//! deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new action batches.

mod actor;
mod config;
mod grid;
mod music;
mod nursery;

use std::{fmt, str::FromStr};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use actor::{Actor, ActorId};
pub use config::{
    ActorConfig, ConfigError, GardenConfig, DEFAULT_TIMESCALE, MAX_BOARD_SIZE, MAX_TIMESCALE,
    MIN_TIMESCALE,
};
pub use grid::{Cell, CellCoord, CellId, Grid};
pub use music::{NoteEvent, NoteTrigger, Pitch, PitchClass};
pub use nursery::{InstrumentGroup, InstrumentId, Nursery, PlantPreset, SelectedPreset};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the garden.";

/// Snapshot of the four directional keys sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionKeys {
    /// `W`: accelerate toward decreasing y.
    pub up: bool,
    /// `S`: accelerate toward increasing y.
    pub down: bool,
    /// `A`: accelerate toward decreasing x.
    pub left: bool,
    /// `D`: accelerate toward increasing x.
    pub right: bool,
}

impl DirectionKeys {
    /// Key state with every direction released.
    pub const RELEASED: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };
}

/// Actions that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Ages every plant and integrates the gardener's motion.
    Update {
        /// Elapsed time normalized to frames.
        delta: f32,
        /// Directional keys held during the frame.
        keys: DirectionKeys,
    },
    /// Advances the cellular automaton by one generation.
    Pulse,
    /// Plants the selected nursery preset beneath the gardener.
    Plant,
    /// Selects the previous plant within the current instrument group.
    PreviousNurseryPlant,
    /// Selects the next plant within the current instrument group.
    NextNurseryPlant,
    /// Selects the previous instrument group.
    PreviousNurseryInstrument,
    /// Selects the next instrument group.
    NextNurseryInstrument,
    /// Advances the beat counter.
    IncrementBeat,
    /// Discards the world and rebuilds the canonical initial state.
    Reset,
}

impl Action {
    /// Returns the discriminant describing this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Update { .. } => ActionKind::Update,
            Self::Pulse => ActionKind::Pulse,
            Self::Plant => ActionKind::Plant,
            Self::PreviousNurseryPlant => ActionKind::PreviousNurseryPlant,
            Self::NextNurseryPlant => ActionKind::NextNurseryPlant,
            Self::PreviousNurseryInstrument => ActionKind::PreviousNurseryInstrument,
            Self::NextNurseryInstrument => ActionKind::NextNurseryInstrument,
            Self::IncrementBeat => ActionKind::IncrementBeat,
            Self::Reset => ActionKind::Reset,
        }
    }
}

/// Payload-free discriminant of an [`Action`], used at the adapter boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// See [`Action::Update`].
    Update,
    /// See [`Action::Pulse`].
    Pulse,
    /// See [`Action::Plant`].
    Plant,
    /// See [`Action::PreviousNurseryPlant`].
    PreviousNurseryPlant,
    /// See [`Action::NextNurseryPlant`].
    NextNurseryPlant,
    /// See [`Action::PreviousNurseryInstrument`].
    PreviousNurseryInstrument,
    /// See [`Action::NextNurseryInstrument`].
    NextNurseryInstrument,
    /// See [`Action::IncrementBeat`].
    IncrementBeat,
    /// See [`Action::Reset`].
    Reset,
}

impl ActionKind {
    /// Every action kind in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Update,
        Self::Pulse,
        Self::Plant,
        Self::PreviousNurseryPlant,
        Self::NextNurseryPlant,
        Self::PreviousNurseryInstrument,
        Self::NextNurseryInstrument,
        Self::IncrementBeat,
        Self::Reset,
    ];

    /// External tag used by scripts and input adapters.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Update => "UPDATE",
            Self::Pulse => "PULSE",
            Self::Plant => "PLANT",
            Self::PreviousNurseryPlant => "PREVIOUS_NURSERY_PLANT",
            Self::NextNurseryPlant => "NEXT_NURSERY_PLANT",
            Self::PreviousNurseryInstrument => "PREVIOUS_NURSERY_INSTRUMENT",
            Self::NextNurseryInstrument => "NEXT_NURSERY_INSTRUMENT",
            Self::IncrementBeat => "INCREMENT_BEAT",
            Self::Reset => "RESET",
        }
    }

    /// Builds the concrete action for this kind.
    ///
    /// `delta` and `keys` only populate [`Action::Update`]; every other kind
    /// carries no payload and ignores them.
    #[must_use]
    pub const fn instantiate(self, delta: f32, keys: DirectionKeys) -> Action {
        match self {
            Self::Update => Action::Update { delta, keys },
            Self::Pulse => Action::Pulse,
            Self::Plant => Action::Plant,
            Self::PreviousNurseryPlant => Action::PreviousNurseryPlant,
            Self::NextNurseryPlant => Action::NextNurseryPlant,
            Self::PreviousNurseryInstrument => Action::PreviousNurseryInstrument,
            Self::NextNurseryInstrument => Action::NextNurseryInstrument,
            Self::IncrementBeat => Action::IncrementBeat,
            Self::Reset => Action::Reset,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ActionError::UnknownKind(trimmed.to_owned()))
    }
}

/// Failures raised while admitting actions from outside the core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action tag does not name any known action kind.
    #[error("unknown action kind `{0}`")]
    UnknownKind(String),
}

/// Events broadcast by the world after processing actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that plants aged and the gardener moved.
    TimeAdvanced {
        /// Frame-normalized time that elapsed.
        delta: f32,
    },
    /// Reports the outcome of one automaton generation.
    GenerationAdvanced {
        /// Cells that came alive during the generation.
        births: u32,
        /// Mature cells that died during the generation.
        deaths: u32,
    },
    /// Confirms that a plant was placed into the grid.
    PlantPlaced {
        /// Cell that received the plant.
        cell: CellCoord,
        /// Preset that was planted.
        preset: SelectedPreset,
    },
    /// Reports that a plant request found no cell beneath the gardener.
    PlantingSkipped {
        /// Gardener position at the time of the request.
        position: Vec2,
    },
    /// Announces a new nursery selection.
    SelectionChanged {
        /// Index of the selected instrument group.
        instrument_index: usize,
        /// Index of the selected plant within the group.
        plant_index: usize,
    },
    /// Announces that the beat counter advanced.
    BeatAdvanced {
        /// Beat value after the increment.
        beat: u64,
    },
    /// Announces that the world was rebuilt from configuration.
    WorldReset,
}

/// Number of beats between note emissions for a plant.
///
/// A whole note (`1`) sounds every eight beats, an eighth note (`8`) on every
/// beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DurationClass {
    /// Sounds every eight beats.
    Whole,
    /// Sounds every four beats.
    Half,
    /// Sounds every two beats.
    Quarter,
    /// Sounds on every beat.
    Eighth,
}

impl DurationClass {
    /// Every duration class from longest to shortest.
    pub const ALL: [Self; 4] = [Self::Whole, Self::Half, Self::Quarter, Self::Eighth];

    /// Note-value divisor, one of `1`, `2`, `4` or `8`.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Whole => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
        }
    }

    /// Number of beats between two emissions.
    #[must_use]
    pub const fn beat_interval(self) -> u64 {
        8 / self.divisor() as u64
    }

    /// Reports whether the class sounds on the provided beat.
    #[must_use]
    pub const fn fires_on_beat(self, beat: u64) -> bool {
        beat % self.beat_interval() == 0
    }

    /// Looks up the class with the provided divisor.
    #[must_use]
    pub const fn from_divisor(divisor: u32) -> Option<Self> {
        match divisor {
            1 => Some(Self::Whole),
            2 => Some(Self::Half),
            4 => Some(Self::Quarter),
            8 => Some(Self::Eighth),
            _ => None,
        }
    }
}

impl TryFrom<u32> for DurationClass {
    type Error = ConfigError;

    fn try_from(divisor: u32) -> Result<Self, Self::Error> {
        Self::from_divisor(divisor).ok_or(ConfigError::InvalidDurationClass(divisor))
    }
}

impl From<DurationClass> for u32 {
    fn from(class: DurationClass) -> Self {
        class.divisor()
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.divisor())
    }
}

/// Opaque RGB token painted onto plant cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlantColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl PlantColor {
    /// Color painted onto cells without a plant.
    pub const BLACK: Self = Self::from_rgb(0x00, 0x00, 0x00);

    /// Creates a new plant color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Parses `#rrggbb` or one of the named colors used by the default nursery.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "forestgreen" => Some(Self::from_rgb(0x22, 0x8b, 0x22)),
            "lime" => Some(Self::from_rgb(0x00, 0xff, 0x00)),
            "lightgreen" => Some(Self::from_rgb(0x90, 0xee, 0x90)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let invalid = || ConfigError::InvalidColor(trimmed.to_owned());
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for PlantColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl TryFrom<String> for PlantColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlantColor> for String {
    fn from(color: PlantColor) -> Self {
        color.to_string()
    }
}
