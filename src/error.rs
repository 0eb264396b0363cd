use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors raised when asking an AI seat for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("no legal move available")]
    NoLegalMove,

    #[error("{0} is not controlled by the AI")]
    NotAiSeat(Player),

    #[error("cannot start AI turn: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
