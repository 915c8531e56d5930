use garden_core::{
    Action, DirectionKeys, DurationClass, Event, GardenConfig, Grid, InstrumentId, NoteEvent,
    NoteTrigger, Pitch, PitchClass, PlantColor,
};
use garden_system_music::{
    extract_notes, fires_on_beat, group_by_instrument, notes_for_beat, Music, MusicRules,
};
use garden_world::{self as world, query, WorldStore};

const SYNTH: InstrumentId = InstrumentId::new(0);
const DRUM: InstrumentId = InstrumentId::new(1);
const MATURITY: f32 = 10.0;

fn quick_maturity() -> GardenConfig {
    GardenConfig {
        frame_period_ms: 10.0,
        maturity_ms: 100.0,
        ..GardenConfig::default()
    }
}

/// World with one mature whole-note synth plant beneath the gardener at (5, 7).
fn store_with_mature_plant() -> WorldStore {
    let mut store = WorldStore::init(quick_maturity()).expect("valid configuration");
    let mut events = Vec::new();
    world::apply(&mut store, Action::Plant, &mut events);
    for _ in 0..10 {
        world::apply(
            &mut store,
            Action::Update {
                delta: 1.0,
                keys: DirectionKeys::RELEASED,
            },
            &mut events,
        );
    }
    store
}

fn grid_with(plants: &[(u32, u32, DurationClass, InstrumentId)]) -> Grid {
    plants.iter().fold(
        Grid::new(20, SYNTH, PlantColor::BLACK),
        |grid, (row, column, duration_class, instrument)| {
            let cell = *grid
                .cell_at(i64::from(*row), i64::from(*column))
                .expect("inside grid");
            grid.with_cell(cell.born(
                MATURITY,
                *duration_class,
                PlantColor::from_rgb(1, 1, 1),
                *instrument,
            ))
        },
    )
}

fn rules() -> MusicRules {
    MusicRules::from_config(&quick_maturity())
}

#[test]
fn whole_note_plant_sounds_on_beat_eight() {
    let mut store = store_with_mature_plant();
    let mut events = Vec::new();
    for _ in 0..8 {
        world::apply(&mut store, Action::IncrementBeat, &mut events);
    }
    assert_eq!(query::beat(&store), 8);

    let rules = MusicRules::from_config(store.config());
    assert!(fires_on_beat(DurationClass::Whole, query::beat(&store)));
    assert_eq!(
        extract_notes(query::grid(&store), DurationClass::Whole, &rules),
        vec![NoteEvent {
            pitch: Pitch::new(PitchClass::G, 2),
            instrument: SYNTH,
        }]
    );

    assert!(fires_on_beat(DurationClass::Half, query::beat(&store)));
    assert!(extract_notes(query::grid(&store), DurationClass::Half, &rules).is_empty());
}

#[test]
fn duration_classes_gate_on_their_beat_interval() {
    assert!(fires_on_beat(DurationClass::Whole, 0));
    assert!(!fires_on_beat(DurationClass::Whole, 4));
    assert!(fires_on_beat(DurationClass::Half, 4));
    assert!(!fires_on_beat(DurationClass::Half, 6));
    assert!(fires_on_beat(DurationClass::Quarter, 6));
    assert!(!fires_on_beat(DurationClass::Quarter, 7));
    assert!(fires_on_beat(DurationClass::Eighth, 7));
}

#[test]
fn seedlings_stay_silent() {
    let mut store = WorldStore::init(quick_maturity()).expect("valid configuration");
    let mut events = Vec::new();
    world::apply(&mut store, Action::Plant, &mut events);

    let rules = MusicRules::from_config(store.config());
    assert!(extract_notes(query::grid(&store), DurationClass::Whole, &rules).is_empty());
}

#[test]
fn music_system_reacts_to_beat_events_only() {
    let mut store = store_with_mature_plant();
    let mut events = Vec::new();
    for _ in 0..9 {
        world::apply(&mut store, Action::IncrementBeat, &mut events);
    }

    let mut music = Music::new(MusicRules::from_config(store.config()));
    let mut triggers = Vec::new();
    music.handle(&events, query::grid(&store), &mut triggers);

    assert_eq!(
        triggers,
        vec![NoteTrigger {
            instrument: SYNTH,
            pitches: vec![Pitch::new(PitchClass::G, 2)],
        }]
    );

    triggers.clear();
    music.handle(&[Event::WorldReset], query::grid(&store), &mut triggers);
    assert!(triggers.is_empty());
}

#[test]
fn duplicate_pitches_collapse_per_instrument() {
    // rows 0 and 6 both map to G; columns 1 and 5 share register 2
    let grid = grid_with(&[
        (0, 1, DurationClass::Eighth, SYNTH),
        (6, 5, DurationClass::Eighth, SYNTH),
        (0, 3, DurationClass::Eighth, DRUM),
    ]);

    let notes = extract_notes(&grid, DurationClass::Eighth, &rules());

    assert_eq!(
        notes,
        vec![
            NoteEvent {
                pitch: Pitch::new(PitchClass::G, 2),
                instrument: SYNTH,
            },
            NoteEvent {
                pitch: Pitch::new(PitchClass::G, 2),
                instrument: DRUM,
            },
        ]
    );
}

#[test]
fn notes_follow_grid_scan_order() {
    let grid = grid_with(&[
        (4, 16, DurationClass::Quarter, SYNTH),
        (1, 9, DurationClass::Quarter, SYNTH),
        (2, 0, DurationClass::Quarter, SYNTH),
    ]);

    let pitches: Vec<Pitch> = extract_notes(&grid, DurationClass::Quarter, &rules())
        .into_iter()
        .map(|note| note.pitch)
        .collect();

    assert_eq!(
        pitches,
        vec![
            Pitch::new(PitchClass::A, 3),
            Pitch::new(PitchClass::C, 2),
            Pitch::new(PitchClass::E, 4),
        ]
    );
}

#[test]
fn beat_merges_every_firing_duration_class() {
    let grid = grid_with(&[
        (0, 0, DurationClass::Whole, SYNTH),
        (1, 0, DurationClass::Half, SYNTH),
        (2, 0, DurationClass::Quarter, DRUM),
        (3, 8, DurationClass::Eighth, DRUM),
    ]);
    let rules = rules();

    assert_eq!(
        notes_for_beat(&grid, 4, &rules),
        vec![
            NoteTrigger {
                instrument: SYNTH,
                pitches: vec![Pitch::new(PitchClass::A, 2)],
            },
            NoteTrigger {
                instrument: DRUM,
                pitches: vec![Pitch::new(PitchClass::C, 2), Pitch::new(PitchClass::D, 3)],
            },
        ]
    );

    assert_eq!(
        notes_for_beat(&grid, 3, &rules),
        vec![NoteTrigger {
            instrument: DRUM,
            pitches: vec![Pitch::new(PitchClass::D, 3)],
        }]
    );

    let everything = notes_for_beat(&grid, 16, &rules);
    let notes: Vec<NoteEvent> = DurationClass::ALL
        .into_iter()
        .flat_map(|class| extract_notes(&grid, class, &rules))
        .collect();
    assert_eq!(everything, group_by_instrument(&notes));
    assert_eq!(everything[0].pitches.len(), 2);
}
