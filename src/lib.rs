//! # Gem Duel
//!
//! A match-3 (swap adjacent gems to line up three or more) board engine with
//! a two-player scoring duel and a single-player survival mode. Comes with a
//! terminal UI built with Ratatui and a headless autoplay runner.
//!
//! ## Modules
//!
//! - [`game`]: Core engine: gem grid, match removal, gravity, session rules
//! - [`ai`]: Agent trait and automated players (random, greedy)
//! - [`autoplay`]: Headless agent-vs-agent sessions and result metrics
//! - [`ui`]: Terminal UI: cursor-driven board view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod autoplay;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
