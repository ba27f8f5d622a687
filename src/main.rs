use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gem_duel::config::AppConfig;
use gem_duel::game::GameMode;
use gem_duel::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Gem Duel in the terminal.
#[derive(Parser)]
#[command(name = "gem_duel", about = "Match-3 duel in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gem_duel.toml")]
    config: PathBuf,

    /// Seed the board for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Override the move budget
    #[arg(long)]
    moves: Option<u32>,

    /// Override the game mode (two-player or single-player)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Silent unless RUST_LOG is set, so log lines do not tear the TUI.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        app_config.game.seed = Some(seed);
    }
    if let Some(moves) = cli.moves {
        app_config.game.move_limit = moves;
    }
    if let Some(mode) = cli.mode {
        app_config.game.mode = mode;
    }

    let mut app = App::new(app_config.game).context("creating game")?;
    run(&mut app).context("running terminal UI")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
