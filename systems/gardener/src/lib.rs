#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating sampled gardener controls into world actions.

use garden_core::{Action, DirectionKeys};

/// Input snapshot distilled from adapter-provided frame input data.
///
/// Trigger fields report whether the control is held on this frame; the
/// system fires each trigger once per press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GardenerInput {
    /// Directional keys held this frame.
    pub keys: DirectionKeys,
    /// Plant the selected preset beneath the gardener.
    pub plant: bool,
    /// Select the previous plant of the current instrument.
    pub previous_plant: bool,
    /// Select the next plant of the current instrument.
    pub next_plant: bool,
    /// Select the previous instrument group.
    pub previous_instrument: bool,
    /// Select the next instrument group.
    pub next_instrument: bool,
    /// Rebuild the world from configuration.
    pub reset: bool,
}

impl GardenerInput {
    /// Creates an input snapshot holding only the provided direction keys.
    #[must_use]
    pub const fn moving(keys: DirectionKeys) -> Self {
        Self {
            keys,
            plant: false,
            previous_plant: false,
            next_plant: false,
            previous_instrument: false,
            next_instrument: false,
            reset: false,
        }
    }

    fn triggers(&self) -> [(bool, Action); 6] {
        [
            (self.plant, Action::Plant),
            (self.previous_plant, Action::PreviousNurseryPlant),
            (self.next_plant, Action::NextNurseryPlant),
            (self.previous_instrument, Action::PreviousNurseryInstrument),
            (self.next_instrument, Action::NextNurseryInstrument),
            (self.reset, Action::Reset),
        ]
    }
}

/// Gardener system that converts frame input into an ordered action batch.
#[derive(Clone, Debug, Default)]
pub struct Gardener {
    previous: GardenerInput,
}

impl Gardener {
    /// Creates a new gardener system with every control released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one frame of input and emits the resulting actions.
    ///
    /// Every frame yields exactly one `Action::Update` carrying the key state
    /// and `delta`, followed by the triggers pressed since the previous frame
    /// in the order plant, previous plant, next plant, previous instrument,
    /// next instrument, reset.
    pub fn handle(&mut self, input: GardenerInput, delta: f32, out: &mut Vec<Action>) {
        out.push(Action::Update {
            delta,
            keys: input.keys,
        });

        let held_before = self.previous.triggers();
        for ((pressed, action), (was_pressed, _)) in input.triggers().into_iter().zip(held_before)
        {
            if pressed && !was_pressed {
                out.push(action);
            }
        }

        self.previous = input;
    }
}
