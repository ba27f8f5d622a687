//! Match-3 board engine: gem grid with match detection, removal, gravity and
//! refill, plus the scored session that validates and applies swaps.

mod board;
mod player;
mod state;

pub use board::{
    Board, Cell, Gem, Position, Swap, MAX_CELL_REDRAWS, MAX_SIZE, MIN_SIZE, PALETTE_SIZE,
};
pub use player::Player;
pub use state::{
    GameConfig, GameMode, GameSnapshot, GameStatus, MatchBoard, MoveError, MoveReport,
    MAX_BOARD_ATTEMPTS, MAX_CASCADE_ROUNDS,
};
