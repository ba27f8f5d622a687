//! Automated players that pick swaps from a session's playable moves.

mod agent;
mod greedy;
mod random;

pub use agent::Agent;
pub use greedy::GreedyAgent;
pub use random::RandomAgent;

/// Selectable agent kinds for configuration and the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Random,
    Greedy,
}

impl AgentKind {
    /// Build a boxed agent. `seed` only affects agents that use randomness.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::seeded(seed)),
                None => Box::new(RandomAgent::new()),
            },
            AgentKind::Greedy => Box::new(GreedyAgent::new()),
        }
    }
}
