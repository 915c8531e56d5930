use garden_core::DirectionKeys;
use garden_system_gardener::GardenerInput;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MIN_HOLD_FRAMES: u32 = 20;
const MAX_HOLD_FRAMES: u32 = 90;
const PLANT_CHANCE: f64 = 0.05;
const NEXT_PLANT_CHANCE: f64 = 0.01;
const NEXT_INSTRUMENT_CHANCE: f64 = 0.005;

/// Seeded stand-in for a player steering the gardener around the board.
#[derive(Debug)]
pub(crate) struct Wanderer {
    rng: ChaCha8Rng,
    keys: DirectionKeys,
    frames_left: u32,
}

impl Wanderer {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            keys: DirectionKeys::RELEASED,
            frames_left: 0,
        }
    }

    /// Samples the controls held during the next frame.
    pub(crate) fn next_input(&mut self) -> GardenerInput {
        if self.frames_left == 0 {
            self.keys = DirectionKeys {
                up: self.rng.gen_bool(0.3),
                down: self.rng.gen_bool(0.3),
                left: self.rng.gen_bool(0.3),
                right: self.rng.gen_bool(0.3),
            };
            self.frames_left = self.rng.gen_range(MIN_HOLD_FRAMES..=MAX_HOLD_FRAMES);
        }
        self.frames_left -= 1;

        GardenerInput {
            plant: self.rng.gen_bool(PLANT_CHANCE),
            next_plant: self.rng.gen_bool(NEXT_PLANT_CHANCE),
            next_instrument: self.rng.gen_bool(NEXT_INSTRUMENT_CHANCE),
            ..GardenerInput::moving(self.keys)
        }
    }
}
