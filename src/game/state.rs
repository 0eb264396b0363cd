use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::destruction::{destroy_and_settle, DestructionReport, NeighborBounds};
use super::outcome::{evaluate, winner, OutcomeResult, WinLine};
use super::{Board, ElementType, Piece, PlacementError, Player};

/// Accepted placements between two destruction rounds.
pub const DESTRUCTION_PERIOD: usize = 6;

/// Rule knobs that vary between games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub destruction_period: usize,
    pub neighbor_bounds: NeighborBounds,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            destruction_period: DESTRUCTION_PERIOD,
            neighbor_bounds: NeighborBounds::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player, WinLine),
    Draw,
}

/// Where the turn state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingMove(Player),
    Won(Player, WinLine),
    Drawn,
}

/// Turn bookkeeping exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub active_player: Player,
    pub turn_counter: usize,
    pub is_game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move rejected: {0}")]
    Rejected(#[from] PlacementError),
    #[error("game is over")]
    GameOver,
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: Player },
    #[error("a move for {0} is already in flight")]
    MoveInFlight(Player),
    #[error("moves for {0} are made by the AI")]
    AiSeat(Player),
}

/// Everything that happened while resolving one accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    pub column: usize,
    pub row: usize,
    pub piece: Piece,
    /// Present when this placement triggered a destruction round.
    pub destruction: Option<DestructionReport>,
    pub result: OutcomeResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    turn_counter: usize,
    phase: GamePhase,
    selected_element: ElementType,
    pending: Option<Player>,
    rules: Rules,
}

impl GameState {
    /// Create initial game state with default rules
    pub fn initial() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::One, // Player 1 starts
            turn_counter: 0,
            phase: GamePhase::AwaitingMove(Player::One),
            selected_element: ElementType::Air,
            pending: None,
            rules,
        }
    }

    /// Back to the initial position, keeping the rules.
    pub fn reset(&mut self) {
        *self = Self::with_rules(self.rules);
        debug!("game reset");
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn_counter(&self) -> usize {
        self.turn_counter
    }

    pub fn turn_state(&self) -> TurnState {
        TurnState {
            active_player: self.current_player,
            turn_counter: self.turn_counter,
            is_game_over: self.is_terminal(),
        }
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::AwaitingMove(_) => None,
            GamePhase::Won(player, line) => Some(GameOutcome::Winner(player, line)),
            GamePhase::Drawn => Some(GameOutcome::Draw),
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self.phase, GamePhase::AwaitingMove(_))
    }

    /// Element used for the next piece, whoever places it.
    pub fn selected_element(&self) -> ElementType {
        self.selected_element
    }

    pub fn select_element(&mut self, element: ElementType) {
        self.selected_element = element;
    }

    /// Player whose move is reserved but not yet applied, if any.
    pub fn pending(&self) -> Option<Player> {
        self.pending
    }

    /// Reserve the current turn for a deferred move by the active player.
    /// Until [`GameState::apply_pending`] runs, direct moves for that player
    /// are rejected.
    pub fn begin_pending(&mut self) -> Result<Player, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if let Some(player) = self.pending {
            return Err(MoveError::MoveInFlight(player));
        }
        self.pending = Some(self.current_player);
        Ok(self.current_player)
    }

    /// Drop a reservation without moving.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Apply the reserved move. The reservation is released even when the
    /// placement is rejected.
    pub fn apply_pending(&mut self, column: usize) -> Result<MoveReport, MoveError> {
        let player = self.pending.take().unwrap_or(self.current_player);
        self.apply_move(column, player)
    }

    /// Apply a move for `player` on the live board.
    ///
    /// On success the turn counter advances (running a destruction round when
    /// it reaches the period), the board is evaluated exactly once and the
    /// active player flips unless the game ended.
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<MoveReport, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.pending == Some(player) {
            return Err(MoveError::MoveInFlight(player));
        }
        if player != self.current_player {
            return Err(MoveError::NotYourTurn {
                expected: self.current_player,
            });
        }

        let piece = Piece::new(self.selected_element, player);
        let row = self.board.drop_piece(column, piece)?;
        debug!(player = player.id(), column, row, element = %piece.element, "piece placed");

        self.turn_counter += 1;
        let destruction = if self.turn_counter >= self.rules.destruction_period {
            self.turn_counter = 0;
            let report = destroy_and_settle(&mut self.board, self.rules.neighbor_bounds);
            info!(removed = report.len(), "destruction round");
            Some(report)
        } else {
            None
        };

        let result = evaluate(&self.board);
        match result {
            OutcomeResult::Win(line) => {
                // After a destruction round the line may belong to either player.
                let owner = winner(&self.board, &line).unwrap_or(player);
                info!(winner = owner.id(), ?line, "game won");
                self.phase = GamePhase::Won(owner, line);
            }
            OutcomeResult::Draw => {
                info!("game drawn");
                self.phase = GamePhase::Drawn;
            }
            OutcomeResult::Continue => {
                self.current_player = self.current_player.other();
                self.phase = GamePhase::AwaitingMove(self.current_player);
            }
        }

        Ok(MoveReport {
            player,
            column,
            row,
            piece,
            destruction,
            result,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
