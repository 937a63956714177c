use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bomber_core::input::{InputSnapshot, PlayerInput};
use bomber_core::player::PlayerSlot;

/// Seeded stand-in for two people at a keyboard. Each seat holds a random
/// button combination for a random number of ticks, then picks another.
pub struct ScriptedInput {
    rng: StdRng,
    held: [PlayerInput; 2],
    remaining: [u32; 2],
}

impl ScriptedInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            held: [PlayerInput::default(); 2],
            remaining: [0; 2],
        }
    }

    /// Inputs for the next tick.
    pub fn next_inputs(&mut self) -> InputSnapshot {
        for slot in PlayerSlot::ALL {
            let i = slot.index();
            if self.remaining[i] == 0 {
                self.held[i] = random_input(&mut self.rng);
                self.remaining[i] = self.rng.random_range(5..40);
            }
            self.remaining[i] -= 1;
        }
        InputSnapshot { players: self.held }
    }
}

fn random_input(rng: &mut StdRng) -> PlayerInput {
    PlayerInput {
        left: rng.random_bool(0.4),
        right: rng.random_bool(0.4),
        up: rng.random_bool(0.25),
        drop: rng.random_bool(0.15),
    }
}
