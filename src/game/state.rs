use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::board::{Board, Cell, Position, Swap};
use super::player::Player;
use crate::error::GameError;

/// Full-board regenerations allowed before construction gives up.
pub const MAX_BOARD_ATTEMPTS: usize = 1_000;

/// Extra remove/refill rounds one move may trigger when cascading is on.
pub const MAX_CASCADE_ROUNDS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Players alternate and race for points within the move budget.
    #[default]
    TwoPlayer,
    /// One player survives until the budget runs out or the board locks up.
    SinglePlayer,
}

impl GameMode {
    pub fn name(self) -> &'static str {
        match self {
            GameMode::TwoPlayer => "Two Player",
            GameMode::SinglePlayer => "Single Player",
        }
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    /// Accepts the same kebab-case names as the config file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-player" => Ok(GameMode::TwoPlayer),
            "single-player" => Ok(GameMode::SinglePlayer),
            other => Err(GameError::Parse(format!(
                "unknown game mode '{other}', expected two-player or single-player"
            ))),
        }
    }
}

/// Board and session settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub gem_kinds: usize,
    pub move_limit: u32,
    pub match_bonus: u32,
    pub mode: GameMode,
    /// Resolve matches created by refill within the same move.
    pub cascade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 8,
            cols: 8,
            gem_kinds: 6,
            move_limit: 20,
            match_bonus: 3,
            mode: GameMode::TwoPlayer,
            cascade: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        Board::check_dimensions(self.rows, self.cols)?;
        self.validate_rules()
    }

    /// Everything except the dimensions, which an injected board supplies.
    fn validate_rules(&self) -> Result<(), GameError> {
        Board::check_palette(self.gem_kinds)?;
        if self.move_limit == 0 {
            return Err(GameError::InvalidMoveLimit);
        }
        if self.match_bonus == 0 {
            return Err(GameError::InvalidBonus);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum GameStatus {
    Ongoing,
    Player1Wins,
    Player2Wins,
    Draw,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Player1Wins => Some(Player::One),
            GameStatus::Player2Wins => Some(Player::Two),
            _ => None,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "Game in progress",
            GameStatus::Player1Wins => "Player 1 wins!",
            GameStatus::Player2Wins => "Player 2 wins!",
            GameStatus::Draw => "It's a draw!",
            GameStatus::Lost => "No moves left. Game lost!",
        }
    }
}

/// Why a swap was rejected. A rejected swap never changes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,
    #[error("position is off the board")]
    OutOfBounds,
    #[error("gems are not adjacent")]
    NotAdjacent,
    #[error("swap does not make a match")]
    NoMatch,
}

/// Outcome of an accepted swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MoveReport {
    pub player: Player,
    /// Pattern instances removed, cascades included.
    pub matches: usize,
    pub points: u32,
    pub cascades: usize,
    /// Whether the session accepts further moves.
    pub active: bool,
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major.
    pub cells: Vec<Cell>,
    pub scores: [u32; 2],
    pub current_player: Player,
    pub moves_remaining: u32,
    pub status: GameStatus,
}

/// A match-3 play session: the gem grid, its RNG, and the score/turn
/// counters. All mutation goes through [`MatchBoard::apply_swap`].
#[derive(Debug, Clone)]
pub struct MatchBoard {
    board: Board,
    config: GameConfig,
    rng: StdRng,
    current_player: Player,
    scores: [u32; 2],
    moves_remaining: u32,
    active: bool,
    // ended because no swap could make a match
    stalled: bool,
}

impl MatchBoard {
    /// Default 8x8 two-player session with the given move budget.
    pub fn new(move_limit: u32, seed: Option<u64>) -> Result<Self, GameError> {
        Self::with_config(&GameConfig {
            move_limit,
            seed,
            ..GameConfig::default()
        })
    }

    /// Generate a board with no initial matches and at least one possible
    /// move, regenerating the whole grid until both hold.
    pub fn with_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);

        for attempt in 1..=MAX_BOARD_ATTEMPTS {
            let board = Board::generate(config.rows, config.cols, config.gem_kinds, &mut rng)?;
            if board.has_possible_moves() {
                debug!(
                    "generated {}x{} board after {} attempt(s), mode {:?}, {} moves",
                    config.rows, config.cols, attempt, config.mode, config.move_limit
                );
                return Ok(Self::start(board, config.clone(), rng));
            }
            debug!("board attempt {attempt} has no possible moves, regenerating");
        }

        Err(GameError::GenerationExhausted {
            attempts: MAX_BOARD_ATTEMPTS,
        })
    }

    /// Start a session on a fixed grid. The board's dimensions override the
    /// config's. A grid with no possible move starts the session already
    /// over.
    pub fn from_board(board: Board, config: &GameConfig) -> Result<Self, GameError> {
        config.validate_rules()?;
        if let Some(index) = board.cells().iter().position(|cell| cell.is_empty()) {
            return Err(GameError::EmptyCell {
                row: index / board.cols(),
                col: index % board.cols(),
            });
        }

        let config = GameConfig {
            rows: board.rows(),
            cols: board.cols(),
            ..config.clone()
        };
        let rng = seeded_rng(config.seed);
        let mut session = Self::start(board, config, rng);

        if !session.board.has_possible_moves() {
            info!("injected board has no possible moves, session over");
            session.active = false;
            session.stalled = true;
        }
        Ok(session)
    }

    fn start(board: Board, config: GameConfig, rng: StdRng) -> Self {
        MatchBoard {
            board,
            moves_remaining: config.move_limit,
            config,
            rng,
            current_player: Player::One,
            scores: [0, 0],
            active: true,
            stalled: false,
        }
    }

    /// Swap two cells by coordinates. Returns false, leaving everything
    /// untouched, if the swap is rejected.
    pub fn attempt_move(&mut self, row1: usize, col1: usize, row2: usize, col2: usize) -> bool {
        let swap = Swap::new(Position::new(row1, col1), Position::new(row2, col2));
        self.apply_swap(swap).is_ok()
    }

    /// Validate and play a swap: remove every match on the board, score the
    /// mover, apply gravity and refill, then advance the turn.
    pub fn apply_swap(&mut self, swap: Swap) -> Result<MoveReport, MoveError> {
        if let Err(err) = self.check_swap(swap) {
            trace!("rejected {:?}: {}", swap, err);
            return Err(err);
        }

        self.board.swap(swap.from, swap.to);
        // the whole board is scanned, not just the swapped cells
        if !self.board.has_match() {
            self.board.swap(swap.from, swap.to);
            trace!("rejected {:?}: {}", swap, MoveError::NoMatch);
            return Err(MoveError::NoMatch);
        }

        let player = self.current_player;
        let kinds = self.config.gem_kinds;
        let mut matches = self.board.remove_matches();
        self.board.drop_gems(&mut self.rng, kinds);

        let mut cascades = 0;
        if self.config.cascade {
            while self.board.has_match() {
                if cascades == MAX_CASCADE_ROUNDS {
                    warn!("cascade stopped after {MAX_CASCADE_ROUNDS} rounds");
                    break;
                }
                matches += self.board.remove_matches();
                self.board.drop_gems(&mut self.rng, kinds);
                cascades += 1;
            }
        }

        let points = u32::try_from(matches)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.config.match_bonus);
        let score = &mut self.scores[player.index()];
        *score = score.saturating_add(points);

        self.moves_remaining -= 1;
        if self.config.mode == GameMode::TwoPlayer {
            self.current_player = player.other();
        }

        let playable = self.board.has_possible_moves();
        if self.moves_remaining == 0 || !playable {
            self.active = false;
            self.stalled = !playable;
            info!(
                "session over: {:?} (scores {} - {}, {} moves left)",
                self.status(),
                self.scores[0],
                self.scores[1],
                self.moves_remaining
            );
        }

        trace!(
            "{} played {:?}: {} match(es), {} point(s), {} cascade(s)",
            player.name(),
            swap,
            matches,
            points,
            cascades
        );

        Ok(MoveReport {
            player,
            matches,
            points,
            cascades,
            active: self.active,
        })
    }

    fn check_swap(&self, swap: Swap) -> Result<(), MoveError> {
        if !self.active || self.moves_remaining == 0 {
            return Err(MoveError::GameOver);
        }
        if !self.board.contains(swap.from) || !self.board.contains(swap.to) {
            return Err(MoveError::OutOfBounds);
        }
        if !swap.from.is_adjacent(swap.to) {
            return Err(MoveError::NotAdjacent);
        }
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        if self.active && self.moves_remaining > 0 {
            return GameStatus::Ongoing;
        }

        match self.config.mode {
            GameMode::SinglePlayer if self.stalled => GameStatus::Lost,
            GameMode::SinglePlayer => GameStatus::Player1Wins,
            GameMode::TwoPlayer => match self.scores[0].cmp(&self.scores[1]) {
                Ordering::Greater => GameStatus::Player1Wins,
                Ordering::Less => GameStatus::Player2Wins,
                Ordering::Equal => GameStatus::Draw,
            },
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Swaps that would currently be accepted.
    pub fn possible_swaps(&self) -> Vec<Swap> {
        if self.status().is_terminal() {
            return Vec::new();
        }
        self.board.possible_swaps()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells: self.board.cells().to_vec(),
            scores: self.scores,
            current_player: self.current_player,
            moves_remaining: self.moves_remaining,
            status: self.status(),
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl fmt::Display for MatchBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.board.cols() {
            write!(f, "{} ", col % 10)?;
        }
        writeln!(f)?;

        for row in 0..self.board.rows() {
            write!(f, "{} ", row % 10)?;
            for col in 0..self.board.cols() {
                write!(f, "{} ", self.board.get(row, col).letter())?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Player 1 Score: {}", self.scores[0])?;
        if self.config.mode == GameMode::TwoPlayer {
            writeln!(f, "Player 2 Score: {}", self.scores[1])?;
            writeln!(f, "Current Player: {}", self.current_player.number())?;
        }
        writeln!(f, "Moves Remaining: {}", self.moves_remaining)
    }
}
