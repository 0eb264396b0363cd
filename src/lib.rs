//! # Elemental Connect
//!
//! Connect Four with elements. Every piece is Fire, Water, Earth or Air, and
//! every sixth placement a destruction round removes pieces that are hemmed in
//! by the element that beats them. Play against a friend or a one-ply AI in a
//! terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Board, elements, win evaluation, destruction round, turn state machine
//! - [`ai`]: Agent trait, lookahead and random agents
//! - [`engine`]: Seats, element selection, paced AI moves, restart
//! - [`ui`]: Terminal UI: board, element bar, controls
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod ui;
