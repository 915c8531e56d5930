#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the garden.
//!
//! All mutation flows through [`apply`], which executes one [`Action`] to
//! completion and reports what changed as [`Event`] values. The pure
//! [`reduce`] function exposes the same transition without a store so that
//! callers can fold action sequences over plain snapshots.

use garden_core::{
    Action, Actor, ActorId, ConfigError, Event, GardenConfig, Grid, Nursery, SelectedPreset,
};
use garden_system_kinematics::integrate;
use garden_system_life::{advance_generation, LifeRules};
use tracing::{debug, warn};

const GARDENER_ID: ActorId = ActorId::new(0);

/// Complete simulation snapshot evolved by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldState {
    grid: Grid,
    actor: Actor,
    nursery: Nursery,
    selected_instrument_index: usize,
    selected_plant_index: usize,
    beat: u64,
}

impl WorldState {
    /// Builds the canonical initial state described by the configuration.
    ///
    /// The grid is empty, the gardener rests at the start position, both
    /// selection indices point at the first entry and the beat is zero.
    #[must_use]
    pub fn initial(config: &GardenConfig) -> Self {
        let nursery = config.nursery.clone();
        Self {
            grid: Grid::new(
                config.board_size,
                nursery.default_instrument(),
                config.dead_color,
            ),
            actor: Actor::at_rest(
                GARDENER_ID,
                config.actor.start_position,
                config.actor.acceleration,
                config.actor.friction,
            ),
            nursery,
            selected_instrument_index: 0,
            selected_plant_index: 0,
            beat: 0,
        }
    }

    /// Planting grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The gardener.
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Plant catalog copied from the configuration.
    #[must_use]
    pub fn nursery(&self) -> &Nursery {
        &self.nursery
    }

    /// Index of the selected instrument group.
    #[must_use]
    pub fn selected_instrument_index(&self) -> usize {
        self.selected_instrument_index
    }

    /// Index of the selected plant within the selected group.
    #[must_use]
    pub fn selected_plant_index(&self) -> usize {
        self.selected_plant_index
    }

    /// Number of beats counted since the last reset.
    #[must_use]
    pub fn beat(&self) -> u64 {
        self.beat
    }

    /// Preset the next planting uses, if the selection names one.
    #[must_use]
    pub fn selected_preset(&self) -> Option<SelectedPreset> {
        self.nursery
            .preset(self.selected_instrument_index, self.selected_plant_index)
    }
}

/// Owner of the configuration and the single mutable world snapshot.
#[derive(Debug)]
pub struct WorldStore {
    config: GardenConfig,
    life_rules: LifeRules,
    state: WorldState,
}

impl WorldStore {
    /// Validates the configuration and builds the initial world.
    pub fn init(config: GardenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = WorldState::initial(&config);
        Ok(Self {
            life_rules: LifeRules::from_config(&config),
            config,
            state,
        })
    }

    /// Read-only view of the current snapshot.
    #[must_use]
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Configuration the store was built with.
    #[must_use]
    pub fn config(&self) -> &GardenConfig {
        &self.config
    }
}

/// Applies the provided action to the store, mutating state deterministically.
pub fn apply(store: &mut WorldStore, action: Action, out_events: &mut Vec<Event>) {
    let event = transition(&store.config, &store.life_rules, &mut store.state, action);

    match &event {
        Some(event) => debug!(kind = %action.kind(), ?event, "applied action"),
        None => debug!(kind = %action.kind(), "action left the world unchanged"),
    }
    out_events.extend(event);
}

/// Pure reducer computing the state that follows `action`.
#[must_use]
pub fn reduce(config: &GardenConfig, mut state: WorldState, action: Action) -> WorldState {
    let _ = transition(config, &LifeRules::from_config(config), &mut state, action);
    state
}

fn transition(
    config: &GardenConfig,
    life_rules: &LifeRules,
    state: &mut WorldState,
    action: Action,
) -> Option<Event> {
    match action {
        Action::Update { delta, keys } => {
            if !(delta.is_finite() && delta > 0.0) {
                return None;
            }
            state.grid = state.grid.map_cells(|cell| cell.aged(delta));
            state.actor = integrate(&state.actor, delta, keys, config.board_extent());
            Some(Event::TimeAdvanced { delta })
        }
        Action::Pulse => {
            let generation = advance_generation(&state.grid, life_rules);
            state.grid = generation.grid;
            Some(Event::GenerationAdvanced {
                births: generation.births,
                deaths: generation.deaths,
            })
        }
        Action::Plant => plant(config, state),
        Action::PreviousNurseryPlant | Action::NextNurseryPlant => {
            let count = state.nursery.option_count(state.selected_instrument_index);
            state.selected_plant_index = cycle(
                state.selected_plant_index,
                count,
                action == Action::NextNurseryPlant,
            );
            Some(selection_changed(state))
        }
        Action::PreviousNurseryInstrument | Action::NextNurseryInstrument => {
            let count = state.nursery.len();
            state.selected_instrument_index = cycle(
                state.selected_instrument_index,
                count,
                action == Action::NextNurseryInstrument,
            );
            Some(selection_changed(state))
        }
        Action::IncrementBeat => {
            state.beat = state.beat.saturating_add(1);
            Some(Event::BeatAdvanced { beat: state.beat })
        }
        Action::Reset => {
            *state = WorldState::initial(config);
            Some(Event::WorldReset)
        }
    }
}

fn plant(config: &GardenConfig, state: &mut WorldState) -> Option<Event> {
    let position = state.actor.position;
    let Some(cell) = state
        .grid
        .cell_at_position(position, config.patch_size)
        .copied()
    else {
        return Some(Event::PlantingSkipped { position });
    };

    let Some(preset) = state.selected_preset() else {
        warn!(
            instrument_index = state.selected_instrument_index,
            plant_index = state.selected_plant_index,
            "selected nursery slot holds no plant; planting ignored"
        );
        return None;
    };

    state.grid.replace_cell(cell.planted(preset));
    Some(Event::PlantPlaced {
        cell: cell.coord(),
        preset,
    })
}

fn selection_changed(state: &WorldState) -> Event {
    Event::SelectionChanged {
        instrument_index: state.selected_instrument_index,
        plant_index: state.selected_plant_index,
    }
}

/// Steps `index` forward or backward through `count` slots, wrapping at both ends.
fn cycle(index: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return index;
    }
    let index = index % count;
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use garden_core::{Cell, GardenConfig, Grid, SelectedPreset};

    use super::{WorldState, WorldStore};

    /// Provides read-only access to the planting grid.
    #[must_use]
    pub fn grid(store: &WorldStore) -> &Grid {
        store.state().grid()
    }

    /// Retrieves the current beat counter.
    #[must_use]
    pub fn beat(store: &WorldStore) -> u64 {
        store.state().beat()
    }

    /// Returns the preset the next planting would use.
    #[must_use]
    pub fn selected_preset(store: &WorldStore) -> Option<SelectedPreset> {
        store.state().selected_preset()
    }

    /// Returns the cell beneath the gardener, if it stands over the board.
    #[must_use]
    pub fn cell_at_gardener<'a>(
        state: &'a WorldState,
        config: &GardenConfig,
    ) -> Option<&'a Cell> {
        state
            .grid()
            .cell_at_position(state.actor().position, config.patch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(cycle(0, 4, true), 1);
        assert_eq!(cycle(3, 4, true), 0);
        assert_eq!(cycle(0, 4, false), 3);
        assert_eq!(cycle(2, 4, false), 1);
    }

    #[test]
    fn cycle_folds_out_of_range_index() {
        assert_eq!(cycle(5, 2, true), 0);
        assert_eq!(cycle(5, 2, false), 0);
        assert_eq!(cycle(3, 0, true), 3);
    }

    #[test]
    fn init_rejects_invalid_configuration() {
        let config = GardenConfig {
            board_size: 0,
            ..GardenConfig::default()
        };
        assert_eq!(
            WorldStore::init(config).map(|_| ()),
            Err(ConfigError::EmptyBoard)
        );

        let oversized = GardenConfig {
            board_size: u32::MAX,
            ..GardenConfig::default()
        };
        assert!(matches!(
            WorldStore::init(oversized),
            Err(ConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn non_positive_delta_is_ignored() {
        let config = GardenConfig::default();
        let mut store = WorldStore::init(config).expect("valid config");
        let before = store.state().clone();
        let mut events = Vec::new();

        apply(
            &mut store,
            Action::Update {
                delta: -1.0,
                keys: garden_core::DirectionKeys::RELEASED,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(store.state(), &before);
    }
}
