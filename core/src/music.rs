use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, InstrumentId};

/// One of the twelve chromatic pitch classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    /// C natural.
    C,
    /// C sharp.
    CSharp,
    /// D natural.
    D,
    /// D sharp.
    DSharp,
    /// E natural.
    E,
    /// F natural.
    F,
    /// F sharp.
    FSharp,
    /// G natural.
    G,
    /// G sharp.
    GSharp,
    /// A natural.
    A,
    /// A sharp.
    ASharp,
    /// B natural.
    B,
}

impl PitchClass {
    const NAMES: [(Self, &'static str); 12] = [
        (Self::C, "C"),
        (Self::CSharp, "C#"),
        (Self::D, "D"),
        (Self::DSharp, "D#"),
        (Self::E, "E"),
        (Self::F, "F"),
        (Self::FSharp, "F#"),
        (Self::G, "G"),
        (Self::GSharp, "G#"),
        (Self::A, "A"),
        (Self::ASharp, "A#"),
        (Self::B, "B"),
    ];

    /// Scientific name of the pitch class, using sharps.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(class, _)| *class == self)
            .map_or("?", |(_, name)| name)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(class, _)| *class)
            .ok_or_else(|| ConfigError::InvalidPitchClass(trimmed.to_owned()))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(class: PitchClass) -> Self {
        class.name().to_owned()
    }
}

/// Pitch class placed in a register, e.g. `G2`.
///
/// Ordering sorts by register first, so pitches sort from low to high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pitch {
    register: u32,
    class: PitchClass,
}

impl Pitch {
    /// Creates a pitch from its class and register.
    #[must_use]
    pub const fn new(class: PitchClass, register: u32) -> Self {
        Self { register, class }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.register)
    }
}

/// Single note produced by a mature plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Pitch to sound.
    pub pitch: Pitch,
    /// Instrument that voices the note.
    pub instrument: InstrumentId,
}

/// Deduplicated pitches one instrument triggers together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteTrigger {
    /// Instrument that voices the pitches.
    pub instrument: InstrumentId,
    /// Distinct pitches in ascending order.
    pub pitches: Vec<Pitch>,
}
