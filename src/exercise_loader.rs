//! Loading exercises from disk.
//!
//! Two formats are recognized by extension: `.pgn` recorded game lines and
//! `.json` single-position exercises (`{ "fen": ..., "bestmove": ... }`).
//! The PGN movetext is resolved against a replayed position using shakmaty,
//! so every stored ply is a legal move with a known source/target square.

use crate::exercise::{Exercise, LinePly};
use serde::Deserialize;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Move, Position};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single exercise file could not be turned into an [`Exercise`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file")]
    Io(#[from] io::Error),
    #[error("invalid FEN \"{0}\"")]
    InvalidFen(String),
    #[error("unreadable move text \"{0}\"")]
    InvalidSan(String),
    #[error("illegal move \"{san}\" at ply {ply}")]
    IllegalMove { san: String, ply: usize },
    #[error("no moves to solve")]
    NoMoves,
    #[error("invalid exercise file: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unsupported file extension")]
    UnsupportedFormat,
}

/// A [`ParseError`] tied to the descriptor it came from.
#[derive(Debug, Error)]
#[error("{}: {}", .path.display(), .kind)]
pub struct ExerciseLoadError {
    pub path: PathBuf,
    #[source]
    pub kind: ParseError,
}

/// Construct a fresh exercise from a descriptor path.
pub fn load(path: &Path) -> Result<Exercise, ExerciseLoadError> {
    let attach = |kind: ParseError| ExerciseLoadError {
        path: path.to_path_buf(),
        kind,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pgn") => {
            let text = fs::read_to_string(path).map_err(|e| attach(e.into()))?;
            parse_pgn(&text).map_err(attach)
        }
        Some("json") => {
            let text = fs::read_to_string(path).map_err(|e| attach(e.into()))?;
            parse_position_json(&text).map_err(attach)
        }
        _ => Err(attach(ParseError::UnsupportedFormat)),
    }
}

/// Parse PGN text (tag section + movetext) into a recorded-line exercise.
///
/// A `FEN` tag overrides the initial position. Comments, variations, NAGs,
/// move numbers and game results are skipped; only the mainline plies are
/// kept.
pub fn parse_pgn(text: &str) -> Result<Exercise, ParseError> {
    let mut fen_tag: Option<String> = None;
    let mut movetext = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            // A tag section after movetext begins a second game; only the
            // first recorded game is used.
            if !movetext.trim().is_empty() {
                break;
            }
            if let Some((name, value)) = parse_tag_pair(trimmed) {
                if name.eq_ignore_ascii_case("FEN") {
                    fen_tag = Some(value);
                }
            }
            continue;
        }
        // Rest-of-line comments end at the newline, so cut them here
        // before the movetext is collapsed into a single string.
        let without_comment = trimmed.split(';').next().unwrap_or("");
        movetext.push_str(without_comment);
        movetext.push(' ');
    }

    let initial = match fen_tag {
        Some(fen) => fen
            .parse::<Fen>()
            .ok()
            .and_then(|f| f.into_position::<Chess>(CastlingMode::Standard).ok())
            .ok_or(ParseError::InvalidFen(fen))?,
        None => Chess::default(),
    };

    let mut pos = initial.clone();
    let mut plies = Vec::new();
    for token in movetext_tokens(&movetext) {
        let Some(san_text) = clean_token(&token) else {
            continue;
        };
        let san: San = san_text
            .parse()
            .map_err(|_| ParseError::InvalidSan(san_text.to_string()))?;
        let mv = san.to_move(&pos).map_err(|_| ParseError::IllegalMove {
            san: san_text.to_string(),
            ply: plies.len() + 1,
        })?;
        let text = square_pair_text(&mv);
        pos.play_unchecked(mv.clone());
        plies.push(LinePly { mv, text });
    }

    if plies.is_empty() {
        return Err(ParseError::NoMoves);
    }
    Ok(Exercise::line(initial, plies))
}

/// Serialized form of a single-position exercise file.
#[derive(Debug, Deserialize)]
struct PositionExerciseFile {
    fen: String,
    #[serde(rename = "bestmove")]
    best_move: String,
}

/// Parse a `{ "fen": ..., "bestmove": ... }` document.
pub fn parse_position_json(text: &str) -> Result<Exercise, ParseError> {
    let file: PositionExerciseFile = serde_json::from_str(text)?;
    let pos = file
        .fen
        .parse::<Fen>()
        .ok()
        .and_then(|f| f.into_position::<Chess>(CastlingMode::Standard).ok())
        .ok_or_else(|| ParseError::InvalidFen(file.fen.clone()))?;

    let best_move = file.best_move.trim().to_string();
    if best_move.is_empty() {
        return Err(ParseError::NoMoves);
    }
    Ok(Exercise::position(
        file.fen,
        best_move,
        pos.turn().is_white(),
    ))
}

/// Four-character source/target text for a recorded move. Castling encodes
/// as the king's travel (`e1g1`); a promotion suffix, if any, is dropped so
/// the text stays expressible by two square selections.
fn square_pair_text(mv: &Move) -> String {
    let mut text = mv.to_uci(CastlingMode::Standard).to_string();
    text.truncate(4);
    text
}

/// `[Name "Value"]` → `(Name, Value)`.
fn parse_tag_pair(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (name, rest) = inner.split_once(char::is_whitespace)?;
    let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((name.to_string(), value.to_string()))
}

/// Split movetext into whitespace-separated tokens, dropping `{...}`
/// comments and the full contents of `(...)` variations (nested).
fn movetext_tokens(movetext: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut variation_depth = 0usize;
    let mut in_comment = false;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    for c in movetext.chars() {
        if in_comment {
            if c == '}' {
                in_comment = false;
            }
            continue;
        }
        match c {
            '{' => {
                flush(&mut current, &mut tokens);
                in_comment = true;
            }
            '(' => {
                flush(&mut current, &mut tokens);
                variation_depth += 1;
            }
            ')' => {
                flush(&mut current, &mut tokens);
                variation_depth = variation_depth.saturating_sub(1);
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c if variation_depth == 0 => current.push(c),
            _ => {}
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

/// Strip move numbers and annotation glyphs from a token; None for tokens
/// that carry no move at all (results, NAGs, bare numbers).
fn clean_token(token: &str) -> Option<&str> {
    if matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*") || token.starts_with('$') {
        return None;
    }
    let stripped = token
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
        .trim_end_matches(['!', '?']);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}
