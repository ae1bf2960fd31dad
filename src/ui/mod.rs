//! Frame layout: board on the left, exercise info and session log on the
//! right, status bar along the bottom of the board column.

pub mod board_scene;

use crate::session_log::LogKind;
use crate::trainer_logic::{Feedback, TrainerSession};
use board_scene::BoardLayout;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the whole frame. Returns the board layout for mouse hit-testing.
pub fn draw_ui(frame: &mut Frame, session: &TrainerSession) -> Option<BoardLayout> {
    let area = frame.size();

    let block = Block::default()
        .title(" Repertoire ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(38), Constraint::Length(28)])
        .split(inner);

    let board_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(17), Constraint::Length(2)])
        .split(columns[0]);

    let side_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(13), Constraint::Min(4)])
        .split(columns[1]);

    let layout = board_scene::render_board(frame, board_column[0], session);
    render_status_bar(frame, board_column[1], session);
    render_info_panel(frame, side_column[0], session);
    render_log_panel(frame, side_column[1], session);

    layout
}

fn render_status_bar(frame: &mut Frame, area: Rect, session: &TrainerSession) {
    if area.height < 1 {
        return;
    }

    let (status, color) = match session.feedback {
        Feedback::Correct => ("Correct!", Color::Green),
        Feedback::Wrong => ("Wrong move", Color::Red),
        Feedback::Completed => ("Exercise complete", Color::Yellow),
        Feedback::None => {
            if session.selection.selected().is_some() {
                ("Pick a destination square", Color::Cyan)
            } else {
                ("Pick a source square", Color::White)
            }
        }
    };

    let status_line = Paragraph::new(Line::from(Span::styled(
        status,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(status_line, Rect::new(area.x, area.y, area.width, 1));

    if area.height < 2 {
        return;
    }
    let controls: &[(&str, &str)] = &[
        ("[Click/Enter]", "Select"),
        ("[Arrows]", "Cursor"),
        ("[F]", "Flip"),
        ("[N]", "Next"),
        ("[Q]", "Quit"),
    ];
    let mut spans = Vec::new();
    for (key, action) in controls {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let controls_line = Paragraph::new(Line::from(spans));
    frame.render_widget(controls_line, Rect::new(area.x, area.y + 1, area.width, 1));
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &TrainerSession) {
    let block = Block::default()
        .title(" Exercise ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (answered, expected) = session.exercise.progress();
    let to_move = if session.exercise.white_to_move() {
        "White to move"
    } else {
        "Black to move"
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("\"{}\"", session.exercise_name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            session.exercise.kind_name(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(to_move, Style::default().fg(Color::White))),
        Line::from(vec![
            Span::styled("Progress: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{answered}/{expected} plies"),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Solved: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.stats.completed),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(vec![
            Span::styled("Moves: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", session.stats.correct, session.stats.attempts),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Pool: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} exercises", session.pool.len()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let text = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

fn render_log_panel(frame: &mut Frame, area: Rect, session: &TrainerSession) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let skip = session.log.len().saturating_sub(visible);
    let lines: Vec<Line> = session
        .log
        .entries()
        .skip(skip)
        .map(|entry| {
            let color = match entry.kind {
                LogKind::Info => Color::Gray,
                LogKind::Success => Color::Green,
                LogKind::Failure => Color::Red,
            };
            Line::from(Span::styled(
                entry.message.clone(),
                Style::default().fg(color),
            ))
        })
        .collect();

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}
