//! Host-facing facade: seats, element selection, paced AI moves and restart
//! around a single [`GameState`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::{Agent, LookaheadAgent};
use crate::config::AppConfig;
use crate::error::AgentError;
use crate::game::{
    Board, ElementType, GamePhase, GameState, MoveError, MoveReport, Player, Rules, TurnState,
};

/// Who sits in each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans share the keyboard.
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// Player 1 is human, player 2 is the AI.
    #[default]
    #[serde(rename = "pvai")]
    PlayerVsAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Ai,
}

impl GameMode {
    pub fn seat(self, player: Player) -> Seat {
        match (self, player) {
            (GameMode::PlayerVsAi, Player::Two) => Seat::Ai,
            _ => Seat::Human,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::PlayerVsAi => "Player vs AI",
        }
    }
}

/// An AI decision waiting out its pacing delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAiMove {
    pub player: Player,
    pub column: usize,
    pub due: Instant,
}

pub struct Engine {
    state: GameState,
    mode: GameMode,
    agent: Box<dyn Agent>,
    ai_delay: Duration,
    pending_ai: Option<PendingAiMove>,
}

impl Engine {
    /// Build an engine from configuration with the lookahead agent.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_agent(
            config.game.mode,
            config.rules,
            Box::new(LookaheadAgent::new(config.ai.clone())),
            Duration::from_millis(config.ai.delay_ms),
        )
    }

    pub fn with_agent(
        mode: GameMode,
        rules: Rules,
        agent: Box<dyn Agent>,
        ai_delay: Duration,
    ) -> Self {
        Engine {
            state: GameState::with_rules(rules),
            mode,
            agent,
            ai_delay,
            pending_ai: None,
        }
    }

    /// The only way a human move reaches the board.
    ///
    /// A finished game rejects every request with `GameOver`. Otherwise moves
    /// for an AI seat are rejected; they go through
    /// [`Engine::trigger_ai_turn`] and [`Engine::poll_ai`].
    pub fn request_move(&mut self, column: usize, player: Player) -> Result<MoveReport, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.mode.seat(player) == Seat::Ai {
            return Err(MoveError::AiSeat(player));
        }
        let report = self.state.apply_move(column, player);
        if let Err(err) = &report {
            debug!(column, player = player.id(), %err, "move rejected");
        }
        report
    }

    pub fn is_column_open(&self, column: usize) -> bool {
        self.state.board().is_column_open(column)
    }

    /// True when the column's top cell is taken, so hovering it should not
    /// show a ghost piece.
    pub fn is_column_about_to_be_full(&self, column: usize) -> bool {
        self.state.board().top_occupied(column)
    }

    /// A copy of the live board.
    pub fn snapshot(&self) -> Board {
        *self.state.board()
    }

    /// Decide the AI's column now and schedule it to be dropped after the
    /// pacing delay. While the move is pending no other move for `ai_owner`
    /// is accepted and a second trigger fails.
    pub fn trigger_ai_turn(&mut self, ai_owner: Player) -> Result<usize, AgentError> {
        if self.mode.seat(ai_owner) != Seat::Ai {
            return Err(AgentError::NotAiSeat(ai_owner));
        }
        if self.state.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        if self.state.current_player() != ai_owner {
            return Err(MoveError::NotYourTurn {
                expected: self.state.current_player(),
            }
            .into());
        }

        self.state.begin_pending()?;
        let column = match self.agent.choose_column(self.state.board(), ai_owner) {
            Ok(column) => column,
            Err(err) => {
                self.state.cancel_pending();
                warn!(player = ai_owner.id(), %err, "AI could not move");
                return Err(err);
            }
        };

        info!(
            agent = self.agent.name(),
            player = ai_owner.id(),
            column,
            delay_ms = self.ai_delay.as_millis() as u64,
            "AI move scheduled"
        );
        self.pending_ai = Some(PendingAiMove {
            player: ai_owner,
            column,
            due: Instant::now() + self.ai_delay,
        });
        Ok(column)
    }

    /// Apply the pending AI move once its delay has elapsed.
    ///
    /// Returns `None` while nothing is due.
    pub fn poll_ai(&mut self, now: Instant) -> Option<Result<MoveReport, MoveError>> {
        let pending = self.pending_ai?;
        if now < pending.due {
            return None;
        }
        self.pending_ai = None;
        Some(self.state.apply_pending(pending.column))
    }

    /// True when the active seat is the AI and it has not decided yet.
    pub fn ai_should_move(&self) -> bool {
        !self.state.is_terminal()
            && self.pending_ai.is_none()
            && self.mode.seat(self.state.current_player()) == Seat::Ai
    }

    pub fn pending_ai_move(&self) -> Option<PendingAiMove> {
        self.pending_ai
    }

    /// Restart: empty board, player 1 to move, counter and pending AI move cleared.
    pub fn reset(&mut self) {
        self.state.reset();
        self.pending_ai = None;
        info!("new game");
    }

    pub fn select_element(&mut self, element: ElementType) {
        self.state.select_element(element);
    }

    pub fn selected_element(&self) -> ElementType {
        self.state.selected_element()
    }

    pub fn turn_state(&self) -> TurnState {
        self.state.turn_state()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }
}
