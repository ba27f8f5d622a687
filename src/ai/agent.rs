use crate::game::{MatchBoard, Swap};

/// Interface for automated players.
pub trait Agent {
    /// Pick a swap for the current player, or `None` if the session has no
    /// playable swap left.
    fn select_swap(&mut self, game: &MatchBoard) -> Option<Swap>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
