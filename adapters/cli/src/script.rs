use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use garden_core::{Action, ActionKind, DirectionKeys};
use serde::Deserialize;

/// Scripted action list replayed against a fresh world.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Script {
    #[serde(default)]
    actions: Vec<ScriptedAction>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedAction {
    kind: String,
    delta_ms: Option<f32>,
    #[serde(default)]
    keys: String,
    #[serde(default = "single")]
    repeat: u32,
}

fn single() -> u32 {
    1
}

impl Script {
    /// Reads and parses a script file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid script {}", path.display()))
    }

    /// Parses a TOML script document.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("malformed TOML")
    }

    /// Expands the script into world actions.
    ///
    /// `delta_ms` is converted into frames using `frame_period_ms`; updates
    /// without one advance a single frame. Unknown action kinds abort the
    /// whole script.
    pub(crate) fn actions(&self, frame_period_ms: f32) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        for (index, step) in self.actions.iter().enumerate() {
            let kind: ActionKind = step
                .kind
                .parse()
                .with_context(|| format!("script action #{}", index + 1))?;
            let keys = parse_keys(&step.keys)
                .with_context(|| format!("script action #{}", index + 1))?;
            let delta = step.delta_ms.map_or(1.0, |millis| millis / frame_period_ms);
            let action = kind.instantiate(delta, keys);
            actions.extend(std::iter::repeat(action).take(step.repeat as usize));
        }
        Ok(actions)
    }
}

/// Parses held keys written as W/A/S/D letters, e.g. `"WD"`.
pub(crate) fn parse_keys(value: &str) -> Result<DirectionKeys> {
    let mut keys = DirectionKeys::RELEASED;
    for letter in value.chars().filter(|letter| !letter.is_whitespace()) {
        match letter.to_ascii_uppercase() {
            'W' => keys.up = true,
            'S' => keys.down = true,
            'A' => keys.left = true,
            'D' => keys.right = true,
            other => bail!("unknown key `{other}`; expected W, A, S or D"),
        }
    }
    Ok(keys)
}
