use crate::app::AppState;
use crate::domain::TaskStatus;
use crate::model::TaskStore;
use crate::ui::progress::CircularProgress;
use crate::ui::styles::{border_style, idle_style, paused_style, running_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the current session: progress ring on the left, details on the right
pub fn render_status_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let controller = &app.controller;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" 🍅 Flow ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(15), Constraint::Min(0)])
        .split(inner);

    let (status_style, ring_color) = match controller.task_status() {
        TaskStatus::Started => (running_style(), Color::Magenta),
        TaskStatus::Paused => (paused_style(), Color::Yellow),
        TaskStatus::Stopped => (idle_style(), Color::DarkGray),
    };

    let remaining = format!("{}m", controller.remaining_minutes());
    let ring = CircularProgress::new(
        controller.elapsed_minutes() as i64,
        controller.current_task_duration() as i64,
    )
    .foreground(ring_color)
    .draw_outer_border(controller.first_seconds_after_adding());
    let ring = if controller.stopped() { ring } else { ring.label(&remaining) };
    f.render_widget(ring, chunks[0]);

    let mut lines = Vec::new();
    if controller.stopped() {
        lines.push(Line::raw("No pomodoro running."));
        lines.push(Line::raw(format!(
            "{} queued · sessions last {} minutes",
            controller.queue().count(),
            controller.default_pomodoro_duration()
        )));
    } else {
        lines.push(Line::from(Span::styled(
            controller.task_text().to_string(),
            title_style(),
        )));
        lines.push(Line::raw(format!(
            "{} of {} minutes left",
            controller.remaining_minutes(),
            controller.current_task_duration()
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Status: "),
        Span::styled(controller.task_status().label(), status_style),
    ]));
    if let Some(message) = &app.status_message {
        lines.push(Line::raw(message.clone()));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(details, chunks[1]);
}
