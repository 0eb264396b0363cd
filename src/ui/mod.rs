//! Terminal UI: board rendering, element bar and the interactive game loop.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
