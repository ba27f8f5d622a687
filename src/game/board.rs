use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::GameError;

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 32;
pub const PALETTE_SIZE: usize = 6;

/// Redraws allowed per cell during initial fill before falling back to a
/// deterministic pick.
pub const MAX_CELL_REDRAWS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Gem {
    Diamond,
    Ruby,
    Emerald,
    Sapphire,
    Amethyst,
    Topaz,
}

impl Gem {
    pub const ALL: [Gem; PALETTE_SIZE] = [
        Gem::Diamond,
        Gem::Ruby,
        Gem::Emerald,
        Gem::Sapphire,
        Gem::Amethyst,
        Gem::Topaz,
    ];

    /// Draw a gem uniformly from the first `kinds` entries of the palette.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, kinds: usize) -> Gem {
        Gem::ALL[rng.random_range(0..kinds)]
    }

    pub fn letter(self) -> char {
        match self {
            Gem::Diamond => 'D',
            Gem::Ruby => 'R',
            Gem::Emerald => 'E',
            Gem::Sapphire => 'S',
            Gem::Amethyst => 'A',
            Gem::Topaz => 'T',
        }
    }

    pub fn from_letter(letter: char) -> Option<Gem> {
        Gem::ALL
            .iter()
            .copied()
            .find(|gem| gem.letter() == letter.to_ascii_uppercase())
    }

    pub fn name(self) -> &'static str {
        match self {
            Gem::Diamond => "Diamond",
            Gem::Ruby => "Ruby",
            Gem::Emerald => "Emerald",
            Gem::Sapphire => "Sapphire",
            Gem::Amethyst => "Amethyst",
            Gem::Topaz => "Topaz",
        }
    }
}

/// A grid slot. `Empty` only exists between match removal and refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Cell {
    Empty,
    Gem(Gem),
}

impl Cell {
    pub fn gem(self) -> Option<Gem> {
        match self {
            Cell::Gem(gem) => Some(gem),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn letter(self) -> char {
        match self {
            Cell::Gem(gem) => gem.letter(),
            Cell::Empty => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance of exactly one.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A pair of cells to exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Swap {
    pub from: Position,
    pub to: Position,
}

impl Swap {
    pub fn new(from: Position, to: Position) -> Self {
        Swap { from, to }
    }

    pub fn reversed(self) -> Swap {
        Swap {
            from: self.to,
            to: self.from,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), GameError> {
        let valid = MIN_SIZE..=MAX_SIZE;
        if valid.contains(&rows) && valid.contains(&cols) {
            Ok(())
        } else {
            Err(GameError::InvalidDimensions { rows, cols })
        }
    }

    pub fn check_palette(kinds: usize) -> Result<(), GameError> {
        if (3..=PALETTE_SIZE).contains(&kinds) {
            Ok(())
        } else {
            Err(GameError::InvalidPalette(kinds))
        }
    }

    /// Fill a fresh board cell by cell, never completing a run of three to
    /// the left or above. Does not check for possible moves.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        kinds: usize,
        rng: &mut R,
    ) -> Result<Board, GameError> {
        Self::check_dimensions(rows, cols)?;
        Self::check_palette(kinds)?;

        let mut board = Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        };

        for row in 0..rows {
            for col in 0..cols {
                let mut gem = Gem::random(rng, kinds);
                let mut redraws = 0;
                while board.completes_run(row, col, gem) {
                    redraws += 1;
                    if redraws >= MAX_CELL_REDRAWS {
                        // kinds >= 3 and at most two gems can complete a run
                        gem = Gem::ALL[..kinds]
                            .iter()
                            .copied()
                            .find(|&g| !board.completes_run(row, col, g))
                            .unwrap_or(gem);
                        break;
                    }
                    gem = Gem::random(rng, kinds);
                }
                board.set(row, col, Cell::Gem(gem));
            }
        }

        Ok(board)
    }

    /// Build a board from explicit gem rows. All rows must share one length.
    pub fn from_rows(rows: Vec<Vec<Gem>>) -> Result<Board, GameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Self::check_dimensions(height, width)?;
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::Parse("rows have different lengths".into()));
        }

        Ok(Board {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().map(Cell::Gem).collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at a specific position
    /// Row 0 is the top
    ///
    /// # Panics
    ///
    /// Panics if the position is off the board. Check with [`Board::contains`].
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// # Panics
    ///
    /// Panics if the position is off the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Exchange two cells.
    ///
    /// # Panics
    ///
    /// Panics if either position is off the board.
    pub fn swap(&mut self, a: Position, b: Position) {
        let i = a.row * self.cols + a.col;
        let j = b.row * self.cols + b.col;
        self.cells.swap(i, j);
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_empty())
    }

    fn completes_run(&self, row: usize, col: usize, gem: Gem) -> bool {
        let cell = Cell::Gem(gem);
        (col >= 2 && self.get(row, col - 1) == cell && self.get(row, col - 2) == cell)
            || (row >= 2 && self.get(row - 1, col) == cell && self.get(row - 2, col) == cell)
    }

    /// Length of the run of equal gems starting at (row, col) and extending
    /// by (d_row, d_col). Zero for an empty cell.
    fn run_length(&self, row: usize, col: usize, d_row: usize, d_col: usize) -> usize {
        let cell = self.get(row, col);
        if cell.is_empty() {
            return 0;
        }

        let mut len = 1;
        let (mut r, mut c) = (row + d_row, col + d_col);
        while r < self.rows && c < self.cols && self.get(r, c) == cell {
            len += 1;
            r += d_row;
            c += d_col;
        }
        len
    }

    /// True if any horizontal or vertical run of three or more exists
    /// anywhere on the board.
    pub fn has_match(&self) -> bool {
        (0..self.rows).any(|row| {
            (0..self.cols).any(|col| {
                self.run_length(row, col, 0, 1) >= 3 || self.run_length(row, col, 1, 0) >= 3
            })
        })
    }

    /// Number of match pattern instances on the board. A run of length n
    /// contributes n - 2 instances.
    pub fn count_matches(&self) -> usize {
        let mut count = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.run_length(row, col, 0, 1) >= 3 {
                    count += 1;
                }
                if self.run_length(row, col, 1, 0) >= 3 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Mark every cell in a run of three or more, then empty the marked cells
    /// in one pass. Returns the number of pattern instances found.
    pub fn remove_matches(&mut self) -> usize {
        let mut marked = vec![false; self.cells.len()];
        let mut instances = 0;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let horizontal = self.run_length(row, col, 0, 1);
                if horizontal >= 3 {
                    instances += 1;
                    for k in 0..horizontal {
                        marked[row * self.cols + col + k] = true;
                    }
                }

                let vertical = self.run_length(row, col, 1, 0);
                if vertical >= 3 {
                    instances += 1;
                    for k in 0..vertical {
                        marked[(row + k) * self.cols + col] = true;
                    }
                }
            }
        }

        for (cell, remove) in self.cells.iter_mut().zip(marked) {
            if remove {
                *cell = Cell::Empty;
            }
        }

        instances
    }

    /// Compact every column downward, keeping gem order. Vacated cells end
    /// up at the top as `Empty`.
    pub fn collapse(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for row in (0..self.rows).rev() {
                let cell = self.get(row, col);
                if cell.is_empty() {
                    continue;
                }
                write -= 1;
                if write != row {
                    self.set(write, col, cell);
                    self.set(row, col, Cell::Empty);
                }
            }
        }
    }

    /// Fill every empty cell with a uniformly drawn gem. Returns the number
    /// of cells filled.
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R, kinds: usize) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_empty()) {
            *cell = Cell::Gem(Gem::random(rng, kinds));
            filled += 1;
        }
        filled
    }

    /// Gravity followed by refill.
    pub fn drop_gems<R: Rng + ?Sized>(&mut self, rng: &mut R, kinds: usize) -> usize {
        self.collapse();
        self.refill(rng, kinds)
    }

    /// Every swap with the right or lower neighbour that would leave a match
    /// somewhere on the board, in row-major scan order.
    pub fn possible_swaps(&self) -> Vec<Swap> {
        self.scan_swaps(false)
    }

    pub fn has_possible_moves(&self) -> bool {
        !self.scan_swaps(true).is_empty()
    }

    fn scan_swaps(&self, first_only: bool) -> Vec<Swap> {
        let mut scratch = self.clone();
        let mut found = Vec::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let from = Position::new(row, col);
                let neighbours = [Position::new(row, col + 1), Position::new(row + 1, col)];
                for to in neighbours {
                    if !self.contains(to) {
                        continue;
                    }
                    scratch.swap(from, to);
                    let matched = scratch.has_match();
                    scratch.swap(from, to);
                    if matched {
                        found.push(Swap::new(from, to));
                        if first_only {
                            return found;
                        }
                    }
                }
            }
        }

        found
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols).map(|col| self.get(row, col).letter()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// One line per row, one letter per gem, `.` for an empty cell.
    /// Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        Self::check_dimensions(rows, cols)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(GameError::Parse(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for ch in line.chars() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    _ => Cell::Gem(Gem::from_letter(ch).ok_or_else(|| {
                        GameError::Parse(format!("unknown gem '{ch}' in row {row}"))
                    })?),
                };
                cells.push(cell);
            }
        }

        Ok(Board { rows, cols, cells })
    }
}
