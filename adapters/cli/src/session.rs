use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use garden_core::{Action, Event, GardenConfig, NoteTrigger};
use garden_system_clock::{frame_delta, BeatClock, Timescale};
use garden_system_gardener::{Gardener, GardenerInput};
use garden_system_music::{Music, MusicRules};
use garden_world::{self as world, query, WorldStore};
use serde::Serialize;
use tracing::debug;

use crate::wander::Wanderer;

/// Counters accumulated while a session runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) actions: u64,
    pub(crate) beats: u64,
    pub(crate) generations: u64,
    pub(crate) births: u64,
    pub(crate) deaths: u64,
    pub(crate) plantings: u64,
    pub(crate) note_triggers: u64,
}

/// One line of the JSON note log.
#[derive(Debug, Serialize)]
struct NoteLine<'a> {
    beat: u64,
    instrument: u32,
    instrument_name: Option<&'a str>,
    pitches: Vec<String>,
}

/// World store paired with the music system and the session counters.
#[derive(Debug)]
pub(crate) struct Session {
    store: WorldStore,
    music: Music,
    events: Vec<Event>,
    triggers: Vec<NoteTrigger>,
    summary: Summary,
}

impl Session {
    pub(crate) fn new(config: GardenConfig) -> Result<Self> {
        let music = Music::new(MusicRules::from_config(&config));
        let store = WorldStore::init(config).context("configuration rejected by the world")?;
        Ok(Self {
            store,
            music,
            events: Vec::new(),
            triggers: Vec::new(),
            summary: Summary::default(),
        })
    }

    pub(crate) fn store(&self) -> &WorldStore {
        &self.store
    }

    pub(crate) fn summary(&self) -> Summary {
        self.summary
    }

    /// Applies one action and writes every resulting note trigger to `notes`.
    pub(crate) fn dispatch<W>(&mut self, action: Action, notes: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        self.events.clear();
        self.triggers.clear();
        world::apply(&mut self.store, action, &mut self.events);
        self.summary.actions += 1;
        self.record_events();

        self.music
            .handle(&self.events, query::grid(&self.store), &mut self.triggers);
        let beat = query::beat(&self.store);
        let nursery = self.store.state().nursery();
        for trigger in &self.triggers {
            let line = NoteLine {
                beat,
                instrument: trigger.instrument.get(),
                instrument_name: nursery.instrument_name(trigger.instrument),
                pitches: trigger.pitches.iter().map(ToString::to_string).collect(),
            };
            serde_json::to_writer(&mut *notes, &line).context("failed to encode note")?;
            writeln!(notes).context("failed to write note")?;
            self.summary.note_triggers += 1;
        }
        Ok(())
    }

    fn record_events(&mut self) {
        for event in &self.events {
            match event {
                Event::BeatAdvanced { .. } => self.summary.beats += 1,
                Event::GenerationAdvanced { births, deaths } => {
                    self.summary.generations += 1;
                    self.summary.births += u64::from(*births);
                    self.summary.deaths += u64::from(*deaths);
                }
                Event::PlantPlaced { .. } => self.summary.plantings += 1,
                Event::PlantingSkipped { position } => {
                    debug!(?position, "gardener stood beyond the last cell; nothing planted");
                }
                Event::TimeAdvanced { .. }
                | Event::SelectionChanged { .. }
                | Event::WorldReset => {}
            }
        }
    }
}

/// Simulates `seconds` of wall time with a seeded wandering gardener.
///
/// Each frame first applies the gardener's actions, then the clock's beat
/// actions for the elapsed frame period. A frame that resets the world
/// restarts the clock and plays no beat.
pub(crate) fn wander<W>(
    session: &mut Session,
    timescale: Timescale,
    seed: u64,
    seconds: f64,
    notes: &mut W,
) -> Result<()>
where
    W: Write + ?Sized,
{
    let frame_period_ms = session.store().config().frame_period_ms;
    let frame_period = Duration::from_secs_f64(f64::from(frame_period_ms) / 1000.0);
    let frames = (seconds * 1000.0 / f64::from(frame_period_ms)).round() as u64;
    let delta = frame_delta(frame_period, frame_period_ms);

    let mut wanderer = Wanderer::new(seed);
    let mut frame = Frame::new(timescale, frame_period, delta);
    for _ in 0..frames {
        frame.run(session, wanderer.next_input(), notes)?;
    }
    Ok(())
}

/// Per-frame input and clock state shared by every frame of a run.
#[derive(Debug)]
struct Frame {
    gardener: Gardener,
    clock: BeatClock,
    period: Duration,
    delta: f32,
    actions: Vec<Action>,
}

impl Frame {
    fn new(timescale: Timescale, period: Duration, delta: f32) -> Self {
        Self {
            gardener: Gardener::new(),
            clock: BeatClock::new(timescale),
            period,
            delta,
            actions: Vec::new(),
        }
    }

    fn run<W>(&mut self, session: &mut Session, input: GardenerInput, notes: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        self.actions.clear();
        self.gardener.handle(input, self.delta, &mut self.actions);
        let reset = self.actions.contains(&Action::Reset);
        for action in self.actions.drain(..) {
            session.dispatch(action, notes)?;
        }

        if reset {
            self.clock.reset();
            return Ok(());
        }
        self.clock.handle(self.period, &mut self.actions);
        for action in self.actions.drain(..) {
            session.dispatch(action, notes)?;
        }
        Ok(())
    }
}
