use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{MatchBoard, Swap};

/// An agent that selects uniformly at random from the playable swaps.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_swap(&mut self, game: &MatchBoard) -> Option<Swap> {
        let swaps = game.possible_swaps();
        if swaps.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..swaps.len());
        Some(swaps[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
