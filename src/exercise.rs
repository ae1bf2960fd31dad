//! Exercise state: the position(s) shown to the trainee and the expected
//! solution moves.
//!
//! Two kinds of exercise exist. A `Position` exercise is a fixed position
//! with one expected move. A `Line` exercise walks a recorded game: the
//! trainee supplies every other ply, the opponent's replies are implied by
//! the record and applied automatically.

use shakmaty::fen::Fen;
use shakmaty::{Chess, EnPassantMode, Move, Position};

/// One recorded ply: the replayable legal move plus its four-character
/// source/target text (promotion suffix dropped, see `exercise_loader`).
#[derive(Debug, Clone)]
pub struct LinePly {
    pub mv: Move,
    pub text: String,
}

/// A single trainable unit, picked fresh from the pool each time.
#[derive(Debug, Clone)]
pub enum Exercise {
    /// Fixed position + one expected move.
    Position {
        fen: String,
        best_move: String,
        white_to_move: bool,
        solved: bool,
    },
    /// Recorded line. `cursor` indexes the next ply the trainee owes; it
    /// only ever advances, in steps of two.
    Line {
        initial: Chess,
        plies: Vec<LinePly>,
        cursor: usize,
    },
}

impl Exercise {
    pub fn position(fen: String, best_move: String, white_to_move: bool) -> Self {
        Exercise::Position {
            fen,
            best_move,
            white_to_move,
            solved: false,
        }
    }

    pub fn line(initial: Chess, plies: Vec<LinePly>) -> Self {
        Exercise::Line {
            initial,
            plies,
            cursor: 0,
        }
    }

    /// The position to display, as a FEN string.
    ///
    /// For a line this is recomputed from scratch on every call: clone the
    /// initial position and replay the recorded plies up to the cursor. The
    /// parsed move list is the single source of truth; no incrementally
    /// mutated board exists to drift out of sync.
    pub fn current_fen(&self) -> String {
        match self {
            Exercise::Position { fen, .. } => fen.clone(),
            Exercise::Line {
                initial,
                plies,
                cursor,
            } => {
                let mut pos = initial.clone();
                for ply in &plies[..(*cursor).min(plies.len())] {
                    pos.play_unchecked(ply.mv.clone());
                }
                Fen::from_position(&pos, EnPassantMode::Always).to_string()
            }
        }
    }

    /// Validate a candidate move against the expected solution.
    ///
    /// Comparison is exact string equality on the four-character move text;
    /// no legality or equivalence reasoning. On a match the line cursor
    /// skips past the implied opponent reply. A call on an already complete
    /// exercise is a no-op returning false.
    pub fn check_move(&mut self, candidate: &str) -> bool {
        if self.is_complete() {
            return false;
        }
        match self {
            Exercise::Position {
                best_move, solved, ..
            } => {
                if candidate == best_move {
                    *solved = true;
                    true
                } else {
                    false
                }
            }
            Exercise::Line { plies, cursor, .. } => {
                if candidate == plies[*cursor].text {
                    *cursor += 2;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// True once every expected move has been matched.
    pub fn is_complete(&self) -> bool {
        match self {
            Exercise::Position { solved, .. } => *solved,
            Exercise::Line { plies, cursor, .. } => *cursor >= plies.len(),
        }
    }

    /// Side the trainee plays, which is shown at the bottom of the board.
    /// For a line the trainee owes every other ply, so this never changes
    /// over the life of the exercise.
    pub fn white_to_move(&self) -> bool {
        match self {
            Exercise::Position { white_to_move, .. } => *white_to_move,
            Exercise::Line { initial, .. } => initial.turn().is_white(),
        }
    }

    /// (plies answered, plies expected) for progress display.
    pub fn progress(&self) -> (usize, usize) {
        match self {
            Exercise::Position { solved, .. } => (usize::from(*solved), 1),
            Exercise::Line { plies, cursor, .. } => ((*cursor).min(plies.len()), plies.len()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Exercise::Position { .. } => "Single position",
            Exercise::Line { .. } => "Game line",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_loader::parse_pgn;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn four_knights_line() -> Exercise {
        parse_pgn("1. e4 e5 2. Nf3 Nf6").expect("valid movetext")
    }

    #[test]
    fn test_position_exercise_checks_exact_text() {
        let mut exercise =
            Exercise::position(START_FEN.to_string(), "e2e4".to_string(), true);
        assert!(!exercise.is_complete());
        assert!(!exercise.check_move("d2d4"));
        assert!(!exercise.is_complete());
        assert!(exercise.check_move("e2e4"));
        assert!(exercise.is_complete());
    }

    #[test]
    fn test_position_exercise_fen_is_fixed() {
        let mut exercise =
            Exercise::position(START_FEN.to_string(), "e2e4".to_string(), true);
        assert_eq!(exercise.current_fen(), START_FEN);
        exercise.check_move("e2e4");
        assert_eq!(exercise.current_fen(), START_FEN);
    }

    #[test]
    fn test_line_cursor_advances_by_two() {
        let mut exercise = four_knights_line();
        assert_eq!(exercise.progress(), (0, 4));

        assert!(exercise.check_move("e2e4"));
        assert_eq!(exercise.progress(), (2, 4));
        assert!(!exercise.is_complete());

        assert!(exercise.check_move("g1f3"));
        assert_eq!(exercise.progress(), (4, 4));
        assert!(exercise.is_complete());
    }

    #[test]
    fn test_line_mismatch_leaves_cursor_unchanged() {
        let mut exercise = four_knights_line();
        assert!(!exercise.check_move("d2d4"));
        assert_eq!(exercise.progress(), (0, 4));
        assert!(exercise.check_move("e2e4"));
        assert!(!exercise.check_move("e2e4"));
        assert_eq!(exercise.progress(), (2, 4));
    }

    #[test]
    fn test_check_after_complete_is_noop() {
        let mut exercise = four_knights_line();
        exercise.check_move("e2e4");
        exercise.check_move("g1f3");
        assert!(exercise.is_complete());
        assert!(!exercise.check_move("f3g5"));
        assert_eq!(exercise.progress(), (4, 4));
    }

    #[test]
    fn test_replay_includes_implied_reply() {
        let mut exercise = four_knights_line();
        exercise.check_move("e2e4");

        // Position after 1. e4 e5 -- the opponent's recorded reply is
        // applied automatically in the displayed position.
        let expected = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
        assert_eq!(exercise.current_fen(), expected);
        // Repeated queries replay from scratch and agree.
        assert_eq!(exercise.current_fen(), expected);
    }

    #[test]
    fn test_replay_clamps_past_final_ply() {
        // A line ending on the trainee's move pushes the cursor past the
        // end; the replay must clamp instead of indexing out of range.
        let mut exercise = parse_pgn("1. e4 e5 2. Nf3").expect("valid movetext");
        exercise.check_move("e2e4");
        exercise.check_move("g1f3");
        assert!(exercise.is_complete());
        let fen = exercise.current_fen();
        assert!(fen.starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"));
    }

    #[test]
    fn test_side_to_move_follows_initial_position() {
        let exercise = four_knights_line();
        assert!(exercise.white_to_move());

        let black = Exercise::position(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string(),
            "e7e5".to_string(),
            false,
        );
        assert!(!black.white_to_move());
    }
}
