use crate::engine::{Engine, Seat};
use crate::game::{ElementType, GamePhase, COLS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, element_color, player_color};

pub fn render(frame: &mut Frame, engine: &Engine, selected_column: usize, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Elements
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_elements(frame, engine.selected_element(), chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, engine: &Engine, area: Rect) {
    let turn = engine.turn_state();
    let period = engine.state().rules().destruction_period;
    let until_destruction = period.saturating_sub(turn.turn_counter);

    let (status, color) = match engine.phase() {
        GamePhase::AwaitingMove(player) => {
            let who = match engine.mode().seat(player) {
                Seat::Ai if engine.pending_ai_move().is_some() => {
                    format!("{} ({} thinking...)", player.name(), engine.agent_name())
                }
                Seat::Ai => format!("{} ({})", player.name(), engine.agent_name()),
                Seat::Human => player.name().to_string(),
            };
            (
                format!(
                    "Current: {}  |  Destruction in {}  |  {}",
                    who,
                    until_destruction,
                    engine.mode().name()
                ),
                player_color(player),
            )
        }
        GamePhase::Won(player, _) => (
            format!("Game Over: {} won!  |  {}", player.name(), engine.mode().name()),
            player_color(player),
        ),
        GamePhase::Drawn => (
            format!("Game Over: Draw!  |  {}", engine.mode().name()),
            Color::White,
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Elemental Connect"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, engine: &Engine, selected_column: usize, area: Rect) {
    let board = engine.snapshot();
    let highlight: Vec<(usize, usize)> = match engine.phase() {
        GamePhase::Won(_, line) => line.cells().to_vec(),
        _ => Vec::new(),
    };

    let mut lines = Vec::new();

    // Ghost piece above the hovered column, hidden once the column is topped out
    let ghost_color = player_color(engine.turn_state().active_player);
    let mut ghost_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column
            && !engine.turn_state().is_game_over
            && !engine.is_column_about_to_be_full(col)
        {
            ghost_line.push(Span::styled(
                format!(" {} ", engine.selected_element().symbol()),
                Style::default().fg(ghost_color).add_modifier(Modifier::DIM),
            ));
        } else {
            ghost_line.push(Span::raw("   "));
        }
    }
    ghost_line.push(Span::raw(" "));
    lines.push(Line::from(ghost_line));

    lines.extend(board_lines(&board, &highlight));

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_elements(frame: &mut Frame, selected: ElementType, area: Rect) {
    let mut spans = Vec::new();
    for (i, element) in ElementType::ALL.iter().enumerate() {
        let mut style = Style::default().fg(element_color(*element));
        if *element == selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} {} ", i + 1, element.name()), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("beaten by {}", selected.strong_against().name()),
        Style::default().fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Element"));
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from("1-4: Air / Fire / Earth / Water  (or a, f, e, w)");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
