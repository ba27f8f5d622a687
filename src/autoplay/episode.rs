use crate::ai::Agent;
use crate::error::AutoplayError;
use crate::game::{GameConfig, GameStatus, MatchBoard, Player};
use log::trace;

/// Result of a single autoplay session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EpisodeResult {
    pub status: GameStatus,
    pub moves_played: u32,
    pub scores: [u32; 2],
}

impl EpisodeResult {
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }
}

/// Play one session to a terminal status. `agents[0]` moves for player one
/// and `agents[1]` for player two; single-player sessions only use the first.
pub fn play_episode(
    config: &GameConfig,
    agents: &mut [Box<dyn Agent>; 2],
) -> Result<EpisodeResult, AutoplayError> {
    let mut game = MatchBoard::with_config(config)?;

    while !game.status().is_terminal() {
        let agent = match game.current_player() {
            Player::One => &mut agents[0],
            Player::Two => &mut agents[1],
        };
        let swap = agent.select_swap(&game).ok_or_else(|| AutoplayError::NoSwap {
            agent: agent.name().to_string(),
        })?;
        game.apply_swap(swap)
            .map_err(|reason| AutoplayError::IllegalSwap {
                agent: agent.name().to_string(),
                swap,
                reason,
            })?;
    }

    trace!(
        "episode finished: {:?}, scores {}-{}",
        game.status(),
        game.score(Player::One),
        game.score(Player::Two)
    );
    Ok(EpisodeResult {
        status: game.status(),
        moves_played: config.move_limit - game.moves_remaining(),
        scores: [game.score(Player::One), game.score(Player::Two)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{GreedyAgent, RandomAgent};
    use crate::game::{GameMode, Swap};

    /// Always proposes the same swap.
    struct StubbornAgent(Swap);

    impl Agent for StubbornAgent {
        fn select_swap(&mut self, _game: &MatchBoard) -> Option<Swap> {
            Some(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    fn seeded(seed: u64) -> GameConfig {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_episode_reaches_terminal_status() {
        let mut agents: [Box<dyn Agent>; 2] =
            [Box::new(GreedyAgent::new()), Box::new(RandomAgent::seeded(4))];
        let result = play_episode(&seeded(4), &mut agents).unwrap();

        assert!(result.status.is_terminal());
        assert!(result.moves_played >= 1);
        assert!(result.moves_played <= 20);
        match result.scores[0].cmp(&result.scores[1]) {
            std::cmp::Ordering::Greater => assert_eq!(result.status, GameStatus::Player1Wins),
            std::cmp::Ordering::Less => assert_eq!(result.status, GameStatus::Player2Wins),
            std::cmp::Ordering::Equal => assert_eq!(result.status, GameStatus::Draw),
        }
    }

    #[test]
    fn test_single_player_episode_scores_player_one_only() {
        let config = GameConfig {
            mode: GameMode::SinglePlayer,
            ..seeded(5)
        };
        let mut agents: [Box<dyn Agent>; 2] =
            [Box::new(RandomAgent::seeded(5)), Box::new(RandomAgent::seeded(6))];
        let result = play_episode(&config, &mut agents).unwrap();

        assert_eq!(result.scores[1], 0);
        assert!(matches!(
            result.status,
            GameStatus::Player1Wins | GameStatus::Lost
        ));
    }

    #[test]
    fn test_illegal_swap_is_reported() {
        use crate::game::Position;

        let diagonal = Swap::new(Position::new(0, 0), Position::new(1, 1));
        let mut agents: [Box<dyn Agent>; 2] = [
            Box::new(StubbornAgent(diagonal)),
            Box::new(RandomAgent::seeded(7)),
        ];
        let err = play_episode(&seeded(7), &mut agents).unwrap_err();
        assert!(matches!(err, AutoplayError::IllegalSwap { .. }));
        assert!(err.to_string().contains("Stubborn"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = GameConfig {
            move_limit: 0,
            ..seeded(1)
        };
        let mut agents: [Box<dyn Agent>; 2] =
            [Box::new(GreedyAgent::new()), Box::new(GreedyAgent::new())];
        assert!(matches!(
            play_episode(&config, &mut agents),
            Err(AutoplayError::Game(_))
        ));
    }
}
