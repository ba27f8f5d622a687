use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gem_duel::ai::{Agent, AgentKind};
use gem_duel::autoplay::{play_episode, AutoplayMetrics};
use gem_duel::config::AppConfig;
use gem_duel::game::{GameMode, Player};

/// Run headless Gem Duel sessions between automated players.
#[derive(Parser)]
#[command(name = "autoplay", about = "Pit Gem Duel agents against each other")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gem_duel.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Agent for player one
    #[arg(long, value_enum)]
    player_one: Option<AgentKind>,

    /// Agent for player two
    #[arg(long, value_enum)]
    player_two: Option<AgentKind>,

    /// Override the game mode (two-player or single-player)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        app_config.autoplay.games = games;
    }
    if let Some(kind) = cli.player_one {
        app_config.autoplay.player_one = kind;
    }
    if let Some(kind) = cli.player_two {
        app_config.autoplay.player_two = kind;
    }
    if let Some(mode) = cli.mode {
        app_config.game.mode = mode;
    }
    let base_seed = cli.seed.or(app_config.game.seed);
    app_config.validate().context("validating config")?;

    let settings = &app_config.autoplay;
    let mut agents: [Box<dyn Agent>; 2] = [
        settings.player_one.build(base_seed.map(|s| s.wrapping_mul(2))),
        settings.player_two.build(base_seed.map(|s| s.wrapping_mul(2).wrapping_add(1))),
    ];

    info!(
        "playing {} game(s): {} vs {} ({})",
        settings.games,
        agents[0].name(),
        agents[1].name(),
        app_config.game.mode.name()
    );

    let mut metrics = AutoplayMetrics::new();
    for game_index in 0..settings.games {
        let mut game_config = app_config.game.clone();
        game_config.seed = base_seed.map(|s| s.wrapping_add(game_index as u64));

        let result = play_episode(&game_config, &mut agents)
            .with_context(|| format!("game {}", game_index + 1))?;
        metrics.record(result);

        if (game_index + 1) % settings.log_interval == 0 {
            info!(
                "game {:>5} | P1 win {:5.1}% | P2 win {:5.1}% | avg moves {:.1}",
                game_index + 1,
                metrics.win_rate(Player::One) * 100.0,
                metrics.win_rate(Player::Two) * 100.0,
                metrics.average_moves()
            );
        }
    }

    let summary = metrics.summary();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("-------------------------------------------");
        println!("Games played:     {}", summary.games);
        println!(
            "Player 1 ({}):  {:.1}% wins, {:.1} avg score",
            agents[0].name(),
            summary.player_one_win_rate * 100.0,
            summary.average_scores[0]
        );
        if app_config.game.mode == GameMode::TwoPlayer {
            println!(
                "Player 2 ({}):  {:.1}% wins, {:.1} avg score",
                agents[1].name(),
                summary.player_two_win_rate * 100.0,
                summary.average_scores[1]
            );
            println!("Draws:            {:.1}%", summary.draw_rate * 100.0);
        } else {
            println!("Lost (stalled):   {:.1}%", summary.loss_rate * 100.0);
        }
        println!("Average moves:    {:.1}", summary.average_moves);
        println!("-------------------------------------------");
    }

    Ok(())
}
