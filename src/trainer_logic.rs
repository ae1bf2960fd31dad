//! Session orchestration: owns the live exercise, turns completed click
//! gestures into move attempts, and advances through the pool.

use crate::board_geometry;
use crate::constants::FEEDBACK_TICKS;
use crate::exercise::Exercise;
use crate::exercise_loader::ExerciseLoadError;
use crate::pool::ExercisePool;
use crate::selection::{ClickOutcome, Selection};
use crate::session_log::{LogKind, SessionLog};
use rand::Rng;

/// Outcome of a completed move attempt, surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Correct { completed: bool },
    Wrong,
}

/// Transient status-bar feedback with a tick countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
    Completed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub attempts: u32,
    pub correct: u32,
    pub completed: u32,
}

/// All mutable trainer state, owned by the UI thread. No globals; the
/// binary constructs one of these and threads it through input handling
/// and rendering.
pub struct TrainerSession {
    pub pool: ExercisePool,
    pub exercise: Exercise,
    pub exercise_name: String,
    /// Installed position, handed opaquely to the board renderer.
    pub board_fen: String,
    /// Canonical orientation: true when white sits at the bottom. Derived
    /// from the exercise's side to move whenever a board is installed.
    pub white_bottom: bool,
    /// Manual flip on top of the canonical orientation.
    pub flipped: bool,
    pub selection: Selection,
    /// Keyboard cursor, in screen cells.
    pub cursor: (u8, u8),
    pub log: SessionLog,
    pub stats: SessionStats,
    pub feedback: Feedback,
    pub feedback_ticks: u32,
}

impl TrainerSession {
    /// Start a session by drawing the first exercise from the pool.
    pub fn new<R: Rng>(pool: ExercisePool, rng: &mut R) -> Result<Self, ExerciseLoadError> {
        let picked = pool.pick(rng)?;
        let mut session = Self::with_exercise(pool, picked.exercise, picked.name);
        session
            .log
            .push(format!("Exercise: {}", session.exercise_name), LogKind::Info);
        Ok(session)
    }

    /// Build a session around an already constructed exercise.
    pub fn with_exercise(pool: ExercisePool, exercise: Exercise, name: String) -> Self {
        let mut session = Self {
            pool,
            exercise,
            exercise_name: name,
            board_fen: String::new(),
            white_bottom: true,
            flipped: false,
            selection: Selection::Idle,
            cursor: (4, 6),
            log: SessionLog::new(),
            stats: SessionStats::default(),
            feedback: Feedback::None,
            feedback_ticks: 0,
        };
        install_board(&mut session);
        session
    }

    /// Orientation the board is rendered and clicked in right now.
    pub fn orientation(&self) -> bool {
        self.white_bottom != self.flipped
    }

    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let (col, row) = self.cursor;
        self.cursor = (
            (col as i8 + dx).clamp(0, 7) as u8,
            (row as i8 + dy).clamp(0, 7) as u8,
        );
    }
}

/// Install the exercise's current position: refresh the displayed FEN,
/// re-derive the orientation, and clear any pending selection.
fn install_board(session: &mut TrainerSession) {
    session.board_fen = session.exercise.current_fen();
    session.white_bottom = session.exercise.white_to_move();
    session.selection.reset();
}

/// Feed one square click through the gesture state machine. Returns the
/// move outcome when the click completed a source/target pair.
pub fn handle_square_click<R: Rng>(
    session: &mut TrainerSession,
    square: u8,
    rng: &mut R,
) -> Option<MoveOutcome> {
    match session.selection.click(square) {
        // Highlighting is immediate-mode: the renderer reads the selection
        // state each frame, so pick/clear need no further action here.
        ClickOutcome::Picked(_) | ClickOutcome::Cleared(_) => None,
        ClickOutcome::Move { from, to } => Some(attempt_move(session, from, to, rng)),
    }
}

/// Validate a source/target pair against the current exercise.
///
/// The squares are canonical indices, so the move text is derived with
/// plain index arithmetic regardless of how the board is oriented on
/// screen (see `board_geometry::move_text`).
pub fn attempt_move<R: Rng>(
    session: &mut TrainerSession,
    from: u8,
    to: u8,
    rng: &mut R,
) -> MoveOutcome {
    let text = board_geometry::move_text(from, to);
    session.stats.attempts += 1;

    if !session.exercise.check_move(&text) {
        session
            .log
            .push(format!("Wrong move: {text}"), LogKind::Failure);
        set_feedback(session, Feedback::Wrong);
        return MoveOutcome::Wrong;
    }

    session.stats.correct += 1;
    install_board(session);

    if session.exercise.is_complete() {
        session.stats.completed += 1;
        session
            .log
            .push(format!("Correct: {text}"), LogKind::Success);
        session
            .log
            .push("Exercise complete".to_string(), LogKind::Success);
        set_feedback(session, Feedback::Completed);
        next_exercise(session, rng);
        MoveOutcome::Correct { completed: true }
    } else {
        session
            .log
            .push(format!("Correct: {text}"), LogKind::Success);
        set_feedback(session, Feedback::Correct);
        MoveOutcome::Correct { completed: false }
    }
}

/// Draw a fresh exercise from the pool and install its starting position.
///
/// On a load failure the previous exercise stays installed; a partially
/// constructed one is never shown. Returns whether a new exercise was
/// installed.
pub fn next_exercise<R: Rng>(session: &mut TrainerSession, rng: &mut R) -> bool {
    if session.pool.is_empty() {
        session
            .log
            .push("Exercise pool is empty".to_string(), LogKind::Failure);
        return false;
    }
    match session.pool.pick(rng) {
        Ok(picked) => {
            session.exercise = picked.exercise;
            session.exercise_name = picked.name;
            session.flipped = false;
            install_board(session);
            session
                .log
                .push(format!("Exercise: {}", session.exercise_name), LogKind::Info);
            true
        }
        Err(err) => {
            log_load_error(session, &err);
            false
        }
    }
}

fn log_load_error(session: &mut TrainerSession, err: &ExerciseLoadError) {
    session.log.push(format!("{err}"), LogKind::Failure);
}

fn set_feedback(session: &mut TrainerSession, feedback: Feedback) {
    session.feedback = feedback;
    session.feedback_ticks = FEEDBACK_TICKS;
}

/// Count the status-bar feedback down; called once per tick.
pub fn tick_feedback(session: &mut TrainerSession) {
    if session.feedback == Feedback::None {
        return;
    }
    if session.feedback_ticks > 0 {
        session.feedback_ticks -= 1;
    } else {
        session.feedback = Feedback::None;
    }
}
