use crate::error::AgentError;
use crate::game::{Board, Player};

/// Universal interface for computer-controlled players.
pub trait Agent {
    /// Pick a column for `owner` on `board`.
    ///
    /// Implementations may simulate moves on copies of the board but never
    /// mutate it. Fails with [`AgentError::NoLegalMove`] when every column is
    /// full.
    fn choose_column(&mut self, board: &Board, owner: Player) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
