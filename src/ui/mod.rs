//! Terminal UI: a cursor-driven match-3 board with score header.

mod app;
mod game_view;

pub use app::App;
pub use game_view::gem_color;
