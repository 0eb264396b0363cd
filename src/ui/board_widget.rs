use crate::game::{Board, ElementType, Player, COLS, ROWS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Display colour of a player's pieces.
pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

/// Display colour of an element.
pub fn element_color(element: ElementType) -> Color {
    match element {
        ElementType::Fire => Color::LightRed,
        ElementType::Water => Color::LightBlue,
        ElementType::Earth => Color::Green,
        ElementType::Air => Color::White,
    }
}

/// Board rows, top row first, framed with box-drawing borders.
///
/// Each piece shows its element letter in its owner's colour; cells listed in
/// `highlight` (a winning line) are drawn reversed.
pub fn board_lines(board: &Board, highlight: &[(usize, usize)]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(ROWS + 2);

    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in (0..ROWS).rev() {
        let mut spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let span = match board.get(col, row) {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(piece) => {
                    let mut style = Style::default()
                        .fg(player_color(piece.owner))
                        .add_modifier(Modifier::BOLD);
                    if highlight.contains(&(col, row)) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!(" {} ", piece.element.symbol()), style)
                }
            };
            spans.push(span);
        }
        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Piece;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn renders_top_row_first() {
        let mut board = Board::new();
        board
            .drop_piece(0, Piece::new(ElementType::Water, Player::Two))
            .unwrap();
        let lines = board_lines(&board, &[]);
        assert_eq!(lines.len(), ROWS + 2);
        // Bottom board row is the last line before the frame.
        assert!(text(&lines[ROWS]).starts_with("  ║ W "));
        assert!(!text(&lines[1]).contains('W'));
    }

    #[test]
    fn highlighted_cells_are_reversed() {
        let mut board = Board::new();
        board
            .drop_piece(2, Piece::new(ElementType::Fire, Player::One))
            .unwrap();
        let lines = board_lines(&board, &[(2, 0)]);
        let span = &lines[ROWS].spans[3];
        assert_eq!(span.content.as_ref(), " F ");
        assert!(span.style.add_modifier.contains(Modifier::REVERSED));
    }
}
