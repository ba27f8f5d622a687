use crate::game::{Board, Cell, Gem, GameMode, MatchBoard, Player, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game: &MatchBoard,
    cursor: Position,
    selected: Option<Position>,
    message: &Option<String>,
) {
    let board = game.board();
    // column labels and both borders
    let board_height = (board.rows() + 3) as u16;
    let board_width = (board.cols() * 3 + 6) as u16;

    let area = frame.area();
    if area.height < board_height + 9 || area.width < board_width {
        let warning = Paragraph::new(format!(
            "Terminal too small: need {}x{}, have {}x{}",
            board_width,
            board_height + 9,
            area.width,
            area.height
        ))
        .alignment(Alignment::Center);
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(board_height),
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(area);

    render_header(frame, game, chunks[0]);
    render_board(frame, board, cursor, selected, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

pub fn gem_color(gem: Gem) -> Color {
    match gem {
        Gem::Diamond => Color::White,
        Gem::Ruby => Color::Red,
        Gem::Emerald => Color::Green,
        Gem::Sapphire => Color::Blue,
        Gem::Amethyst => Color::Magenta,
        Gem::Topaz => Color::Yellow,
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Cyan,
        Player::Two => Color::LightRed,
    }
}

fn render_header(frame: &mut Frame, game: &MatchBoard, area: Rect) {
    let player = game.current_player();
    let status = game.status();

    let mut spans = vec![Span::styled(
        format!("P1: {}", game.score(Player::One)),
        Style::default().fg(player_color(Player::One)),
    )];
    if game.mode() == GameMode::TwoPlayer {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("P2: {}", game.score(Player::Two)),
            Style::default().fg(player_color(Player::Two)),
        ));
    }
    spans.push(Span::raw(format!("  |  Moves: {}  |  ", game.moves_remaining())));
    if status.is_terminal() {
        spans.push(Span::styled(
            status.describe(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            format!("Turn: {}", player.name()),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Gem Duel ({})", game.mode().name())),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    cursor: Position,
    selected: Option<Position>,
    area: Rect,
) {
    let mut lines = Vec::new();
    let inner_width = board.cols() * 3 + 2;

    // Column numbers
    let mut col_line = vec![Span::raw("    ")];
    for col in 0..board.cols() {
        let style = if col == cursor.col {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        col_line.push(Span::styled(format!("{:^3}", col), style));
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    for row in 0..board.rows() {
        let mut row_spans = vec![Span::raw(format!("{:>2}║ ", row))];

        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let mut style = match board.get(row, col) {
                Cell::Gem(gem) => Style::default().fg(gem_color(gem)),
                Cell::Empty => Style::default().fg(Color::DarkGray),
            };
            if selected == Some(pos) {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            if pos == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let symbol = format!(" {} ", board.get(row, col).letter());
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("Arrows: Move  |  Enter/Space: Select & Swap  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_render_shows_scores_and_gems() {
        let game = MatchBoard::new(20, Some(1)).unwrap();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| render(f, &game, Position::new(0, 0), None, &None))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("P1: 0"));
        assert!(text.contains("Moves: 20"));
        assert!(text.contains("Gem Duel (Two Player)"));
        let first = game.board().get(0, 0).letter();
        assert!(text.contains(first));
    }

    fn render_text(game: &MatchBoard, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render(f, game, Position::new(0, 0), None, &None))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn tall_game() -> MatchBoard {
        let config = GameConfig {
            rows: 16,
            seed: Some(3),
            ..GameConfig::default()
        };
        MatchBoard::with_config(&config).unwrap()
    }

    #[test]
    fn test_tall_board_fits_exactly() {
        let text = render_text(&tall_game(), 80, 28);
        assert!(text.contains("15║"));
        assert!(text.contains("╚"));
        assert!(text.contains("Controls"));
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let text = render_text(&tall_game(), 80, 20);
        assert!(text.contains("Terminal too small: need 30x28, have 80x20"));
        assert!(!text.contains("15║"));
    }

    #[test]
    fn test_every_gem_has_a_distinct_color() {
        let colors: Vec<Color> = Gem::ALL.iter().map(|&g| gem_color(g)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
