//! Board rendering: FEN in, colored glyph grid out, plus mouse hit-testing.

use crate::board_geometry::to_square;
use crate::trainer_logic::TrainerSession;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position, Role, Square};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per board cell.
pub const CELL_HEIGHT: u16 = 2;
/// Columns reserved for the rank labels left of the grid.
const LABEL_WIDTH: u16 = 2;

const LIGHT_SQUARE: Color = Color::Rgb(240, 217, 181);
const DARK_SQUARE: Color = Color::Rgb(181, 136, 99);
const SELECTED_SQUARE: Color = Color::Rgb(106, 168, 79);
const CURSOR_SQUARE: Color = Color::Rgb(90, 140, 170);

/// Where the 8x8 grid landed on screen, reported back to the event loop so
/// mouse clicks can be resolved to cells.
#[derive(Debug, Clone, Copy)]
pub struct BoardLayout {
    pub grid: Rect,
}

impl BoardLayout {
    /// Map an absolute terminal position to a screen grid cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(u8, u8)> {
        if column < self.grid.x || row < self.grid.y {
            return None;
        }
        let col = (column - self.grid.x) / CELL_WIDTH;
        let cell_row = (row - self.grid.y) / CELL_HEIGHT;
        if col < 8 && cell_row < 8 {
            Some((col as u8, cell_row as u8))
        } else {
            None
        }
    }
}

/// Render the installed position. Returns None when the area is too small
/// or the FEN fails to parse (nothing clickable is on screen then).
pub fn render_board(frame: &mut Frame, area: Rect, session: &TrainerSession) -> Option<BoardLayout> {
    let board_width = LABEL_WIDTH + 8 * CELL_WIDTH;
    let board_height = 8 * CELL_HEIGHT + 1;
    if area.width < board_width || area.height < board_height {
        let notice = Paragraph::new("Terminal too small for the board")
            .style(Style::default().fg(Color::Red));
        frame.render_widget(notice, area);
        return None;
    }

    let pos = match parse_position(&session.board_fen) {
        Some(pos) => pos,
        None => {
            let notice = Paragraph::new("Unreadable position")
                .style(Style::default().fg(Color::Red));
            frame.render_widget(notice, area);
            return None;
        }
    };

    // Center the grid in the available area.
    let x_offset = area.x + (area.width - board_width) / 2;
    let y_offset = area.y + (area.height - board_height) / 2;
    let grid = Rect::new(
        x_offset + LABEL_WIDTH,
        y_offset,
        8 * CELL_WIDTH,
        8 * CELL_HEIGHT,
    );

    let white_bottom = session.orientation();
    let selected = session.selection.selected();

    for cell_row in 0..8u8 {
        for text_row in 0..CELL_HEIGHT {
            let mut spans: Vec<Span> = Vec::with_capacity(9);

            // Rank label next to the glyph row of each cell.
            let label = if text_row == 0 {
                let rank = to_square(0, cell_row, white_bottom) / 8;
                format!("{} ", (b'1' + rank) as char)
            } else {
                "  ".to_string()
            };
            spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));

            for col in 0..8u8 {
                let square = to_square(col, cell_row, white_bottom);
                let bg = square_background(session, selected, square);
                let content = if text_row == 0 {
                    cell_glyph_line(&pos, square)
                } else {
                    (" ".repeat(CELL_WIDTH as usize), Color::Reset)
                };
                spans.push(Span::styled(
                    content.0,
                    Style::default().fg(content.1).bg(bg),
                ));
            }

            let y = y_offset + u16::from(cell_row) * CELL_HEIGHT + text_row;
            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(x_offset, y, board_width, 1));
        }
    }

    // File labels under the grid follow the orientation.
    let mut files = " ".repeat(LABEL_WIDTH as usize);
    for col in 0..8u8 {
        let file = to_square(col, 7, white_bottom) % 8;
        files.push_str(&format!(" {}  ", (b'a' + file) as char));
    }
    let labels = Paragraph::new(files).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        labels,
        Rect::new(x_offset, y_offset + 8 * CELL_HEIGHT, board_width, 1),
    );

    Some(BoardLayout { grid })
}

fn parse_position(fen: &str) -> Option<Chess> {
    fen.parse::<Fen>()
        .ok()?
        .into_position::<Chess>(CastlingMode::Standard)
        .ok()
}

fn square_background(
    session: &TrainerSession,
    selected: Option<u8>,
    square: u8,
) -> Color {
    let cursor_square = to_square(session.cursor.0, session.cursor.1, session.orientation());
    if selected == Some(square) {
        SELECTED_SQUARE
    } else if cursor_square == square {
        CURSOR_SQUARE
    } else if (square % 8 + square / 8) % 2 == 1 {
        LIGHT_SQUARE
    } else {
        DARK_SQUARE
    }
}

/// The glyph row of one cell: a centered piece glyph, or blanks.
fn cell_glyph_line(pos: &Chess, square: u8) -> (String, Color) {
    match pos.board().piece_at(Square::new(u32::from(square))) {
        Some(piece) => {
            let glyph = piece_glyph(piece.role);
            let fg = if piece.color.is_white() {
                Color::White
            } else {
                Color::Black
            };
            (format!(" {glyph}  "), fg)
        }
        None => (" ".repeat(CELL_WIDTH as usize), Color::Reset),
    }
}

/// Filled glyphs for both sides; the foreground color tells them apart.
fn piece_glyph(role: Role) -> char {
    match role {
        Role::King => '\u{265A}',
        Role::Queen => '\u{265B}',
        Role::Rook => '\u{265C}',
        Role::Bishop => '\u{265D}',
        Role::Knight => '\u{265E}',
        Role::Pawn => '\u{265F}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_maps_cells() {
        let layout = BoardLayout {
            grid: Rect::new(10, 2, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        assert_eq!(layout.hit_test(10, 2), Some((0, 0)));
        assert_eq!(layout.hit_test(10 + CELL_WIDTH - 1, 2 + CELL_HEIGHT - 1), Some((0, 0)));
        assert_eq!(layout.hit_test(10 + CELL_WIDTH, 2), Some((1, 0)));
        assert_eq!(
            layout.hit_test(10 + 7 * CELL_WIDTH, 2 + 7 * CELL_HEIGHT),
            Some((7, 7))
        );
    }

    #[test]
    fn test_hit_test_rejects_outside() {
        let layout = BoardLayout {
            grid: Rect::new(10, 2, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        assert_eq!(layout.hit_test(9, 2), None);
        assert_eq!(layout.hit_test(10, 1), None);
        assert_eq!(layout.hit_test(10 + 8 * CELL_WIDTH, 2), None);
        assert_eq!(layout.hit_test(10, 2 + 8 * CELL_HEIGHT), None);
    }

    #[test]
    fn test_label_row_is_not_clickable() {
        // The file-label row sits below the grid.
        let layout = BoardLayout {
            grid: Rect::new(0, 0, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        assert_eq!(layout.hit_test(0, 8 * CELL_HEIGHT), None);
    }
}
