#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the garden without a window.
//!
//! `garden run` lets a seeded, wandering gardener tend the board while the
//! clock advances the beat; `garden replay` applies a scripted action list.
//! Both print every note trigger as a JSON line followed by the final board.

mod script;
mod session;
mod settings;
mod text;
mod wander;

use std::{io, path::PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use garden_core::WELCOME_BANNER;
use garden_rendering::{Presenter, Scene};
use garden_system_clock::Timescale;
use tracing::info;

use crate::{script::Script, session::Session, text::TextPresenter};

#[derive(Parser, Debug)]
#[command(
    name = "garden",
    version,
    about = "Headless driver for the generative music garden"
)]
struct Cli {
    /// TOML configuration file; omitted fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a wandering gardener and print the notes the garden plays.
    Run {
        /// Simulated wall time in seconds.
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
        /// Seed of the gardener's wandering.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Tempo slider value, clamped into 50..=250.
        #[arg(long)]
        timescale: Option<u32>,
    },
    /// Apply a scripted list of actions and print the resulting notes.
    Replay {
        /// TOML file listing `[[actions]]` with `kind`, `delta_ms`, `keys` and `repeat`.
        script: PathBuf,
    },
}

/// Entry point for the garden command-line interface.
fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref())?;
    info!("{WELCOME_BANNER}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let session = match cli.command {
        Command::Run {
            seconds,
            seed,
            timescale,
        } => {
            if !(seconds.is_finite() && seconds >= 0.0) {
                bail!("--seconds must be a non-negative number (received {seconds})");
            }
            let timescale = Timescale::clamped(timescale.unwrap_or(config.timescale));
            let mut session = Session::new(config)?;
            session::wander(&mut session, timescale, seed, seconds, &mut out)?;
            session
        }
        Command::Replay { script } => {
            let script = Script::load(&script)?;
            let actions = script.actions(config.frame_period_ms)?;
            let mut session = Session::new(config)?;
            for action in actions {
                session.dispatch(action, &mut out)?;
            }
            session
        }
    };

    let store = session.store();
    let scene = Scene::from_state(store.state(), store.config());
    TextPresenter::new(&mut out).present(&scene)?;

    let summary = session.summary();
    info!(
        actions = summary.actions,
        beats = summary.beats,
        generations = summary.generations,
        births = summary.births,
        deaths = summary.deaths,
        plantings = summary.plantings,
        note_triggers = summary.note_triggers,
        "session finished"
    );
    Ok(())
}
