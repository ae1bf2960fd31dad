//! Input dispatch: terminal key and mouse events to session actions.

use crate::board_geometry::to_square;
use crate::trainer_logic::{self, TrainerSession};
use crate::ui::board_scene::BoardLayout;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;

/// Result of handling one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Keyboard path: arrows steer the cursor, Enter/Space clicks the cursor
/// square through the same gesture state machine the mouse uses.
pub fn handle_key<R: Rng>(
    key: KeyEvent,
    session: &mut TrainerSession,
    rng: &mut R,
) -> InputResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputResult::Quit,
        KeyCode::Esc => {
            // Esc cancels a pending selection first, then quits.
            if session.selection.selected().is_some() {
                session.selection.reset();
            } else {
                return InputResult::Quit;
            }
        }
        KeyCode::Up => session.move_cursor(0, -1),
        KeyCode::Down => session.move_cursor(0, 1),
        KeyCode::Left => session.move_cursor(-1, 0),
        KeyCode::Right => session.move_cursor(1, 0),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let (col, row) = session.cursor;
            let square = to_square(col, row, session.orientation());
            trainer_logic::handle_square_click(session, square, rng);
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            session.flipped = !session.flipped;
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            trainer_logic::next_exercise(session, rng);
        }
        _ => {}
    }
    InputResult::Continue
}

/// Mouse path: a left press inside the board grid clicks that square and
/// pulls the keyboard cursor along with it.
pub fn handle_mouse<R: Rng>(
    mouse: MouseEvent,
    layout: Option<BoardLayout>,
    session: &mut TrainerSession,
    rng: &mut R,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(layout) = layout else {
        return;
    };
    if let Some((col, row)) = layout.hit_test(mouse.column, mouse.row) {
        session.cursor = (col, row);
        let square = to_square(col, row, session.orientation());
        trainer_logic::handle_square_click(session, square, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Exercise;
    use crate::pool::ExercisePool;
    use crate::selection::Selection;
    use crate::ui::board_scene::{CELL_HEIGHT, CELL_WIDTH};
    use crossterm::event::KeyModifiers;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::layout::Rect;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn session() -> TrainerSession {
        TrainerSession::with_exercise(
            ExercisePool::from_paths(Vec::new()),
            Exercise::position(START_FEN.to_string(), "e2e4".to_string(), true),
            "kings-pawn".to_string(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(5)
    }

    #[test]
    fn test_quit_keys() {
        let mut s = session();
        let mut rng = rng();
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut s, &mut rng),
            InputResult::Quit
        );
        assert_eq!(handle_key(key(KeyCode::Esc), &mut s, &mut rng), InputResult::Quit);
    }

    #[test]
    fn test_esc_clears_selection_before_quitting() {
        let mut s = session();
        let mut rng = rng();
        s.cursor = (4, 6); // e2 with white at the bottom
        handle_key(key(KeyCode::Enter), &mut s, &mut rng);
        assert_eq!(s.selection.selected(), Some(12));

        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut s, &mut rng),
            InputResult::Continue
        );
        assert_eq!(s.selection, Selection::Idle);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut s, &mut rng), InputResult::Quit);
    }

    #[test]
    fn test_arrows_steer_cursor_in_screen_space() {
        let mut s = session();
        let mut rng = rng();
        s.cursor = (4, 4);
        handle_key(key(KeyCode::Up), &mut s, &mut rng);
        assert_eq!(s.cursor, (4, 3));
        handle_key(key(KeyCode::Left), &mut s, &mut rng);
        assert_eq!(s.cursor, (3, 3));
        handle_key(key(KeyCode::Down), &mut s, &mut rng);
        handle_key(key(KeyCode::Right), &mut s, &mut rng);
        assert_eq!(s.cursor, (4, 4));
    }

    #[test]
    fn test_enter_solves_via_cursor() {
        let mut s = session();
        let mut rng = rng();
        s.cursor = (4, 6); // e2
        handle_key(key(KeyCode::Enter), &mut s, &mut rng);
        s.cursor = (4, 4); // e4
        handle_key(key(KeyCode::Enter), &mut s, &mut rng);
        assert!(s.exercise.is_complete());
        assert_eq!(s.stats.correct, 1);
    }

    #[test]
    fn test_flip_key_toggles_orientation() {
        let mut s = session();
        let mut rng = rng();
        assert!(s.orientation());
        handle_key(key(KeyCode::Char('f')), &mut s, &mut rng);
        assert!(!s.orientation());
        handle_key(key(KeyCode::Char('F')), &mut s, &mut rng);
        assert!(s.orientation());
    }

    #[test]
    fn test_mouse_click_selects_square() {
        let mut s = session();
        let mut rng = rng();
        let layout = BoardLayout {
            grid: Rect::new(0, 0, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        // Cell (4, 6) is e2 with white at the bottom.
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4 * CELL_WIDTH + 1,
            row: 6 * CELL_HEIGHT,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(mouse, Some(layout), &mut s, &mut rng);
        assert_eq!(s.selection.selected(), Some(12));
        assert_eq!(s.cursor, (4, 6));
    }

    #[test]
    fn test_mouse_outside_board_is_ignored() {
        let mut s = session();
        let mut rng = rng();
        let layout = BoardLayout {
            grid: Rect::new(10, 5, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(mouse, Some(layout), &mut s, &mut rng);
        assert_eq!(s.selection, Selection::Idle);
    }

    #[test]
    fn test_mouse_release_and_drag_are_ignored() {
        let mut s = session();
        let mut rng = rng();
        let layout = BoardLayout {
            grid: Rect::new(0, 0, 8 * CELL_WIDTH, 8 * CELL_HEIGHT),
        };
        for kind in [
            MouseEventKind::Up(MouseButton::Left),
            MouseEventKind::Drag(MouseButton::Left),
            MouseEventKind::Moved,
        ] {
            let mouse = MouseEvent {
                kind,
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            };
            handle_mouse(mouse, Some(layout), &mut s, &mut rng);
        }
        assert_eq!(s.selection, Selection::Idle);
    }
}
