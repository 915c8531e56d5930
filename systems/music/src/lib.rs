#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Beat-quantized music system that turns mature plants into note triggers.
//!
//! Rows select a pitch class from the configured scale, columns select the
//! register, and each plant's duration class decides on which beats it
//! sounds. Results are grouped per instrument and deduplicated so a
//! synthesizer receives each pitch at most once per beat.

use std::collections::{BTreeMap, BTreeSet};

use garden_core::{
    DurationClass, Event, GardenConfig, Grid, NoteEvent, NoteTrigger, Pitch, PitchClass,
};

/// Columns spanned by one register.
const COLUMNS_PER_REGISTER: u32 = 8;
/// Register assigned to the leftmost columns.
const BASE_REGISTER: u32 = 2;

/// Parameters of the note-extraction query.
#[derive(Clone, Debug, PartialEq)]
pub struct MusicRules {
    maturity_age: f32,
    scale: Vec<PitchClass>,
}

impl MusicRules {
    /// Creates rules from an explicit maturity age and row scale.
    #[must_use]
    pub fn new(maturity_age: f32, scale: Vec<PitchClass>) -> Self {
        Self {
            maturity_age,
            scale,
        }
    }

    /// Derives the rules from the garden configuration.
    #[must_use]
    pub fn from_config(config: &GardenConfig) -> Self {
        Self::new(config.maturity_age(), config.scale.clone())
    }

    /// Pitch sounded by a plant at the provided coordinate.
    ///
    /// Returns `None` only when the scale is empty.
    #[must_use]
    pub fn pitch_at(&self, row: u32, column: u32) -> Option<Pitch> {
        let length = u32::try_from(self.scale.len()).ok().filter(|len| *len > 0)?;
        let index = usize::try_from(row % length).ok()?;
        let class = *self.scale.get(index)?;
        Some(Pitch::new(class, register_from_column(column)))
    }
}

/// Register of a column: `floor(column / 8) + 2`.
#[must_use]
pub const fn register_from_column(column: u32) -> u32 {
    column / COLUMNS_PER_REGISTER + BASE_REGISTER
}

/// Reports whether plants of `duration_class` sound on `beat`.
#[must_use]
pub const fn fires_on_beat(duration_class: DurationClass, beat: u64) -> bool {
    duration_class.fires_on_beat(beat)
}

/// Collects the notes of every mature plant with the given duration class.
///
/// Notes are listed in grid scan order; repeated `(instrument, pitch)` pairs
/// are kept once.
#[must_use]
pub fn extract_notes(
    grid: &Grid,
    duration_class: DurationClass,
    rules: &MusicRules,
) -> Vec<NoteEvent> {
    let mut seen = BTreeSet::new();
    grid.iter()
        .filter(|cell| cell.duration_class() == duration_class)
        .filter(|cell| cell.is_mature(rules.maturity_age))
        .filter_map(|cell| {
            rules.pitch_at(cell.row(), cell.column()).map(|pitch| NoteEvent {
                pitch,
                instrument: cell.instrument(),
            })
        })
        .filter(|note| seen.insert((note.instrument, note.pitch)))
        .collect()
}

/// Groups notes per instrument, deduplicating pitches.
///
/// Instruments are ordered by identifier and pitches ascend from low to high.
#[must_use]
pub fn group_by_instrument(notes: &[NoteEvent]) -> Vec<NoteTrigger> {
    let mut grouped: BTreeMap<_, BTreeSet<Pitch>> = BTreeMap::new();
    for note in notes {
        let _ = grouped.entry(note.instrument).or_default().insert(note.pitch);
    }
    grouped
        .into_iter()
        .map(|(instrument, pitches)| NoteTrigger {
            instrument,
            pitches: pitches.into_iter().collect(),
        })
        .collect()
}

/// Evaluates every duration class that fires on `beat` and merges the result.
#[must_use]
pub fn notes_for_beat(grid: &Grid, beat: u64, rules: &MusicRules) -> Vec<NoteTrigger> {
    let notes: Vec<NoteEvent> = DurationClass::ALL
        .into_iter()
        .filter(|class| fires_on_beat(*class, beat))
        .flat_map(|class| extract_notes(grid, class, rules))
        .collect();
    group_by_instrument(&notes)
}

/// Pure system that listens for beat events and emits note triggers.
#[derive(Debug)]
pub struct Music {
    rules: MusicRules,
}

impl Music {
    /// Creates a new music system with the provided rules.
    #[must_use]
    pub fn new(rules: MusicRules) -> Self {
        Self { rules }
    }

    /// Consumes world events and the current grid to emit note triggers.
    ///
    /// Every `Event::BeatAdvanced` yields the merged triggers of that beat;
    /// beats on which nothing sounds contribute nothing.
    pub fn handle(&mut self, events: &[Event], grid: &Grid, out: &mut Vec<NoteTrigger>) {
        for event in events {
            if let Event::BeatAdvanced { beat } = event {
                out.extend(notes_for_beat(grid, *beat, &self.rules));
            }
        }
    }
}
