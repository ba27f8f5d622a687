use crate::error::GameError;
use crate::game::{GameConfig, MatchBoard, MoveError, Position, Swap};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game: MatchBoard,
    config: GameConfig,
    cursor: Position,
    selected: Option<Position>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let game = MatchBoard::with_config(&config)?;
        Ok(Self::from_session(game))
    }

    /// Wrap an existing session. Restarts regenerate from its config.
    pub fn from_session(game: MatchBoard) -> Self {
        App {
            config: game.config().clone(),
            game,
            cursor: Position::new(0, 0),
            selected: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &MatchBoard {
        &self.game
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let rows = self.game.board().rows();
        let cols = self.game.board().cols();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor.row + 1 < rows {
                    self.cursor.row += 1;
                }
            }
            KeyCode::Left => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor.col + 1 < cols {
                    self.cursor.col += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// First press picks a gem, second press swaps it with the cursor gem.
    fn select(&mut self) {
        if self.game.status().is_terminal() {
            self.message = Some(format!(
                "{} Press 'r' to restart.",
                self.game.status().describe()
            ));
            return;
        }

        let Some(first) = self.selected.take() else {
            self.selected = Some(self.cursor);
            let cell = self.game.board().get(self.cursor.row, self.cursor.col);
            let name = cell.gem().map_or("Empty", |gem| gem.name());
            self.message = Some(format!(
                "Selected {} at ({}, {}). Pick a neighbour to swap.",
                name, self.cursor.row, self.cursor.col
            ));
            return;
        };

        if first == self.cursor {
            self.message = Some("Selection cleared.".to_string());
            return;
        }

        match self.game.apply_swap(Swap::new(first, self.cursor)) {
            Ok(report) => {
                let status = self.game.status();
                self.message = Some(if status.is_terminal() {
                    status.describe().to_string()
                } else {
                    format!(
                        "{} scored {} point(s) from {} match(es).",
                        report.player.name(),
                        report.points,
                        report.matches
                    )
                });
            }
            Err(MoveError::NotAdjacent) => {
                self.message = Some("Gems not adjacent, swap ignored.".to_string());
            }
            Err(MoveError::NoMatch) => {
                self.message = Some("No match. Try again.".to_string());
            }
            Err(MoveError::OutOfBounds) => {
                self.message = Some("Invalid position!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn restart(&mut self) {
        match MatchBoard::with_config(&self.config) {
            Ok(game) => {
                debug!("game restarted");
                self.game = game;
                self.cursor = Position::new(0, 0);
                self.selected = None;
                self.message = Some("New game started!".to_string());
            }
            Err(err) => {
                self.message = Some(format!("Restart failed: {err}"));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.cursor, self.selected, &self.message);
    }
}
