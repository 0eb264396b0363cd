use crate::engine::Engine;
use crate::error::AgentError;
use crate::game::{ElementType, GamePhase, MoveError, MoveReport, OutcomeResult, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error};

const START_COLUMN: usize = COLS / 2;

pub struct App {
    engine: Engine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        App {
            engine,
            selected_column: START_COLUMN,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());
            self.handle_events()?;
        }
        Ok(())
    }

    /// Advance the AI: decide when its seat is up, drop once the delay is over.
    fn tick(&mut self, now: Instant) {
        if self.engine.ai_should_move() {
            let owner = self.engine.turn_state().active_player;
            if let Err(err) = self.engine.trigger_ai_turn(owner) {
                self.report_agent_error(err);
            }
        }

        match self.engine.poll_ai(now) {
            Some(Ok(report)) => self.message = Some(describe(&report, self.engine.phase())),
            Some(Err(err)) => {
                error!(%err, "pending AI move failed");
                self.message = Some(format!("AI move failed: {err}"));
            }
            None => {}
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.selected_column = START_COLUMN;
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char(c) => {
                if let Some(element) = element_for_key(c) {
                    self.engine.select_element(element);
                    debug!(element = element.name(), "element selected");
                }
            }
            _ => {}
        }
    }

    /// Drop the selected element in the selected column for the player to move
    fn drop_piece(&mut self) {
        let player = self.engine.turn_state().active_player;
        match self.engine.request_move(self.selected_column, player) {
            Ok(report) => self.message = Some(describe(&report, self.engine.phase())),
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(MoveError::AiSeat(_)) | Err(MoveError::MoveInFlight(_)) => {
                self.message = Some(format!("Waiting for {}...", self.engine.agent_name()));
            }
            Err(err) => {
                self.message = Some(capitalize(&err.to_string()));
            }
        }
    }

    fn report_agent_error(&mut self, err: AgentError) {
        error!(%err, "AI turn could not start");
        self.message = Some(format!("AI error: {err}"));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

/// Number keys follow the on-screen element bar; letters are mnemonics.
fn element_for_key(c: char) -> Option<ElementType> {
    match c.to_ascii_lowercase() {
        '1' | 'a' => Some(ElementType::Air),
        '2' | 'f' => Some(ElementType::Fire),
        '3' | 'e' => Some(ElementType::Earth),
        '4' | 'w' => Some(ElementType::Water),
        _ => None,
    }
}

fn describe(report: &MoveReport, phase: GamePhase) -> String {
    let mut parts = Vec::new();
    if let Some(destruction) = &report.destruction {
        parts.push(match destruction.len() {
            0 => "Destruction round: nothing destroyed.".to_string(),
            1 => "Destruction round: 1 piece destroyed!".to_string(),
            n => format!("Destruction round: {n} pieces destroyed!"),
        });
    }
    // A destruction round can hand the line to the player who did not move.
    match (report.result, phase) {
        (OutcomeResult::Win(_), GamePhase::Won(winner, _)) => {
            parts.push(format!("{} wins!", winner.name()));
        }
        (OutcomeResult::Draw, _) => parts.push("It's a draw!".to_string()),
        _ => {}
    }
    if parts.is_empty() {
        format!(
            "{} played {} in column {}",
            report.player.name(),
            report.piece.element.name(),
            report.column + 1
        )
    } else {
        parts.join(" ")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
