#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cellular-automaton system that grows and withers plants one generation at a time.
//!
//! Every generation is computed from the previous grid alone; no cell observes
//! a partially updated neighbor. Plants younger than the maturity age are
//! immune to death, and newborn plants inherit the most common attributes of
//! their three parents.

use garden_core::{Cell, DurationClass, GardenConfig, Grid, InstrumentId, PlantColor};

/// Parameters of the transition function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifeRules {
    maturity_age: f32,
    dead_color: PlantColor,
}

impl LifeRules {
    /// Creates rules with an explicit maturity age (in frames) and dead color.
    #[must_use]
    pub const fn new(maturity_age: f32, dead_color: PlantColor) -> Self {
        Self {
            maturity_age,
            dead_color,
        }
    }

    /// Derives the rules from the garden configuration.
    #[must_use]
    pub fn from_config(config: &GardenConfig) -> Self {
        Self::new(config.maturity_age(), config.dead_color)
    }

    /// Age at which plants become mortal and start singing.
    #[must_use]
    pub const fn maturity_age(&self) -> f32 {
        self.maturity_age
    }
}

/// Outcome of advancing the automaton by one generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Grid after the transition.
    pub grid: Grid,
    /// Number of empty cells that came alive.
    pub births: u32,
    /// Number of mature plants that died.
    pub deaths: u32,
}

/// Advances every cell of `grid` by one generation.
#[must_use]
pub fn advance_generation(grid: &Grid, rules: &LifeRules) -> Generation {
    let mut births = 0;
    let mut deaths = 0;

    let next = grid.map_cells(|cell| match transition(grid, cell, rules) {
        Transition::Born(born) => {
            births += 1;
            born
        }
        Transition::Died(withered) => {
            deaths += 1;
            withered
        }
        Transition::Unchanged => *cell,
    });

    Generation {
        grid: next,
        births,
        deaths,
    }
}

enum Transition {
    Born(Cell),
    Died(Cell),
    Unchanged,
}

fn transition(grid: &Grid, cell: &Cell, rules: &LifeRules) -> Transition {
    let neighbors = grid.live_neighbors(cell.coord());

    if !cell.has_plant() {
        if neighbors.len() != 3 {
            return Transition::Unchanged;
        }
        return match inherit(&neighbors) {
            Some((duration_class, color, instrument)) => Transition::Born(cell.born(
                rules.maturity_age,
                duration_class,
                color,
                instrument,
            )),
            None => Transition::Unchanged,
        };
    }

    if cell.age() < rules.maturity_age {
        return Transition::Unchanged;
    }

    match neighbors.len() {
        2 | 3 => Transition::Unchanged,
        _ => Transition::Died(cell.withered(rules.dead_color)),
    }
}

fn inherit(parents: &[&Cell]) -> Option<(DurationClass, PlantColor, InstrumentId)> {
    let duration_class = mode(parents.iter().map(|parent| parent.duration_class()))?;
    let color = mode(parents.iter().map(|parent| parent.color()))?;
    let instrument = mode(parents.iter().map(|parent| parent.instrument()))?;
    Some((duration_class, color, instrument))
}

/// Returns the most frequent value, or `None` for an empty input.
///
/// Among values sharing the highest count, the one seen first wins.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Copy + PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut tallies: Vec<(T, usize)> = Vec::new();
    for value in values {
        match tallies.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tallies.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in tallies {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
