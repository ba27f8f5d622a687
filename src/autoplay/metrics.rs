use crate::game::{GameStatus, Player};

use super::episode::EpisodeResult;

/// Aggregate figures over every recorded session.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AutoplaySummary {
    pub games: usize,
    pub player_one_win_rate: f32,
    pub player_two_win_rate: f32,
    pub draw_rate: f32,
    pub loss_rate: f32,
    pub average_moves: f32,
    pub average_scores: [f32; 2],
}

/// Collects autoplay results.
#[derive(Debug, Default)]
pub struct AutoplayMetrics {
    results: Vec<EpisodeResult>,
}

impl AutoplayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: EpisodeResult) {
        self.results.push(result);
    }

    pub fn total_games(&self) -> usize {
        self.results.len()
    }

    fn rate(&self, pred: impl Fn(&EpisodeResult) -> bool) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        let hits = self.results.iter().filter(|&r| pred(r)).count();
        hits as f32 / self.results.len() as f32
    }

    fn mean(&self, value: impl Fn(&EpisodeResult) -> u32) -> f32 {
        if self.results.is_empty() {
            return 0.0;
        }
        let total: u64 = self.results.iter().map(|r| u64::from(value(r))).sum();
        total as f32 / self.results.len() as f32
    }

    pub fn win_rate(&self, player: Player) -> f32 {
        self.rate(|r| r.winner() == Some(player))
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(|r| r.status == GameStatus::Draw)
    }

    pub fn loss_rate(&self) -> f32 {
        self.rate(|r| r.status == GameStatus::Lost)
    }

    pub fn average_moves(&self) -> f32 {
        self.mean(|r| r.moves_played)
    }

    pub fn average_score(&self, player: Player) -> f32 {
        self.mean(|r| r.scores[player.index()])
    }

    pub fn summary(&self) -> AutoplaySummary {
        AutoplaySummary {
            games: self.total_games(),
            player_one_win_rate: self.win_rate(Player::One),
            player_two_win_rate: self.win_rate(Player::Two),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            average_moves: self.average_moves(),
            average_scores: [
                self.average_score(Player::One),
                self.average_score(Player::Two),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: GameStatus, moves_played: u32, scores: [u32; 2]) -> EpisodeResult {
        EpisodeResult {
            status,
            moves_played,
            scores,
        }
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = AutoplayMetrics::new();
        assert_eq!(metrics.total_games(), 0);
        assert_eq!(metrics.win_rate(Player::One), 0.0);
        assert_eq!(metrics.average_moves(), 0.0);
    }

    #[test]
    fn test_rates_and_averages() {
        let mut metrics = AutoplayMetrics::new();
        metrics.record(result(GameStatus::Player1Wins, 20, [9, 3]));
        metrics.record(result(GameStatus::Player2Wins, 20, [3, 6]));
        metrics.record(result(GameStatus::Draw, 10, [6, 6]));
        metrics.record(result(GameStatus::Player1Wins, 14, [12, 0]));

        assert_eq!(metrics.total_games(), 4);
        assert!((metrics.win_rate(Player::One) - 0.5).abs() < 1e-6);
        assert!((metrics.win_rate(Player::Two) - 0.25).abs() < 1e-6);
        assert!((metrics.draw_rate() - 0.25).abs() < 1e-6);
        assert_eq!(metrics.loss_rate(), 0.0);
        assert!((metrics.average_moves() - 16.0).abs() < 1e-6);
        assert!((metrics.average_score(Player::One) - 7.5).abs() < 1e-6);
        assert!((metrics.average_score(Player::Two) - 3.75).abs() < 1e-6);
    }

    #[test]
    fn test_summary_serializes() {
        let mut metrics = AutoplayMetrics::new();
        metrics.record(result(GameStatus::Lost, 5, [15, 0]));

        let summary = metrics.summary();
        assert_eq!(summary.games, 1);
        assert!((summary.loss_rate - 1.0).abs() < 1e-6);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["games"], 1);
    }
}
