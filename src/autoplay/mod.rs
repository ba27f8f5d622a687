//! Headless sessions between automated players, with aggregate results.

pub mod episode;
pub mod metrics;

use crate::ai::AgentKind;

pub use episode::{play_episode, EpisodeResult};
pub use metrics::{AutoplayMetrics, AutoplaySummary};

/// Autoplay run settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub games: usize,
    pub player_one: AgentKind,
    pub player_two: AgentKind,
    /// Print a progress line every this many games.
    pub log_interval: usize,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            games: 100,
            player_one: AgentKind::Greedy,
            player_two: AgentKind::Random,
            log_interval: 10,
        }
    }
}
