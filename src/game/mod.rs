//! Core game logic: board and placement, win/draw evaluation, the elemental
//! destruction round, and the turn state machine.

mod board;
pub mod destruction;
mod element;
pub mod outcome;
mod player;
mod state;

pub use board::{Board, PlacementError, COLS, ROWS};
pub use destruction::{destroy_and_settle, DestructionReport, NeighborBounds};
pub use element::{ElementType, Piece};
pub use outcome::{evaluate, OutcomeResult, WinLine};
pub use player::Player;
pub use state::{
    GameOutcome, GamePhase, GameState, MoveError, MoveReport, Rules, TurnState,
    DESTRUCTION_PERIOD,
};
