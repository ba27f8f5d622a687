use super::agent::Agent;
use crate::game::{MatchBoard, Swap};

/// Picks the swap that clears the most match patterns right away. Ties go to
/// the earliest swap in row-major scan order.
#[derive(Debug, Default)]
pub struct GreedyAgent;

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent
    }

    /// Pattern instances the swap would remove, before any refill.
    pub fn evaluate(game: &MatchBoard, swap: Swap) -> usize {
        let mut board = game.board().clone();
        board.swap(swap.from, swap.to);
        board.count_matches()
    }
}

impl Agent for GreedyAgent {
    fn select_swap(&mut self, game: &MatchBoard) -> Option<Swap> {
        let mut best: Option<(Swap, usize)> = None;
        for swap in game.possible_swaps() {
            let value = Self::evaluate(game, swap);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((swap, value));
            }
        }
        best.map(|(swap, _)| swap)
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fixtures::{DEAD_BOARD, RUN_OF_FOUR_BOARD};
    use crate::game::{GameConfig, Position};

    fn session(board: &str) -> MatchBoard {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        MatchBoard::from_board(board.parse().unwrap(), &config).unwrap()
    }

    #[test]
    fn test_greedy_prefers_longer_run() {
        // (6,2)<->(7,2) makes EEEE, (7,2)<->(7,3) only EEE
        let game = session(RUN_OF_FOUR_BOARD);
        let mut agent = GreedyAgent::new();

        let vertical = Swap::new(Position::new(6, 2), Position::new(7, 2));
        let horizontal = Swap::new(Position::new(7, 2), Position::new(7, 3));
        assert_eq!(GreedyAgent::evaluate(&game, vertical), 2);
        assert_eq!(GreedyAgent::evaluate(&game, horizontal), 1);
        assert_eq!(agent.select_swap(&game), Some(vertical));
    }

    #[test]
    fn test_greedy_passes_on_dead_board() {
        let game = session(DEAD_BOARD);
        assert_eq!(GreedyAgent::new().select_swap(&game), None);
    }

    #[test]
    fn test_greedy_agent_plays_full_game() {
        let mut agent = GreedyAgent::new();
        let mut game = MatchBoard::new(20, Some(3)).unwrap();

        while let Some(swap) = agent.select_swap(&game) {
            game.apply_swap(swap).unwrap();
        }

        assert!(game.status().is_terminal());
        assert_eq!(agent.name(), "Greedy");
    }
}
