use crate::ui::styles::{border_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the about page
pub fn render_about_pane(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!(" Flow {}", env!("CARGO_PKG_VERSION")),
            title_style(),
        )),
        Line::raw(""),
        Line::raw(" A pomodoro timer driven by a queue of tasks."),
        Line::raw(" Pick a task, work on it until the timer runs out, and it goes"),
        Line::raw(" back to the end of the queue."),
        Line::raw(""),
        Line::raw(concat!(" License: ", env!("CARGO_PKG_LICENSE"))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" About ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
