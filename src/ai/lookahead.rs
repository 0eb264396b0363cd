use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AgentError;
use crate::game::{evaluate, Board, ElementType, OutcomeResult, Piece, Player};

use super::agent::Agent;

/// Which piece the second scan simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockScan {
    /// Repeat the win scan with the agent's own piece. It can never find a
    /// column the first scan missed, so opponent threats go unblocked.
    #[default]
    Mirror,
    /// Simulate the opponent's piece and take the column that would hand
    /// them a win.
    Opponent,
}

/// AI opponent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Pause between deciding on a column and dropping the piece.
    pub delay_ms: u64,
    /// Element the agent assumes for every simulated piece.
    pub simulated_element: ElementType,
    pub block_scan: BlockScan,
    /// Fixed seed for the random fallback; `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            delay_ms: 2500,
            simulated_element: ElementType::Air,
            block_scan: BlockScan::Mirror,
            seed: None,
        }
    }
}

/// One-ply lookahead agent.
///
/// Scans the legal columns in ascending order for an immediate win, runs a
/// second scan according to [`BlockScan`], and otherwise picks a legal column
/// uniformly at random.
pub struct LookaheadAgent {
    config: AiConfig,
    rng: StdRng,
}

impl LookaheadAgent {
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        LookaheadAgent { config, rng }
    }

    /// First column in `columns` where dropping `piece` on a copy of the
    /// board produces a winning line.
    fn winning_column(board: &Board, columns: &[usize], piece: Piece) -> Option<usize> {
        columns.iter().copied().find(|&col| {
            let mut simulated = *board;
            simulated.drop_piece(col, piece).is_ok()
                && matches!(evaluate(&simulated), OutcomeResult::Win(_))
        })
    }
}

impl Default for LookaheadAgent {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

impl Agent for LookaheadAgent {
    fn choose_column(&mut self, board: &Board, owner: Player) -> Result<usize, AgentError> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return Err(AgentError::NoLegalMove);
        }

        let element = self.config.simulated_element;
        let own = Piece::new(element, owner);
        if let Some(col) = Self::winning_column(board, &columns, own) {
            debug!(column = col, "lookahead: winning column");
            return Ok(col);
        }

        let second_piece = match self.config.block_scan {
            BlockScan::Mirror => own,
            BlockScan::Opponent => Piece::new(element, owner.other()),
        };
        if let Some(col) = Self::winning_column(board, &columns, second_piece) {
            debug!(column = col, scan = ?self.config.block_scan, "lookahead: blocking column");
            return Ok(col);
        }

        let col = columns[self.rng.random_range(0..columns.len())];
        debug!(column = col, "lookahead: random column");
        Ok(col)
    }

    fn name(&self) -> &str {
        "Lookahead"
    }
}
