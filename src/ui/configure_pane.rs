use crate::app::AppState;
use crate::ui::styles::{border_style, hint_style, tag_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the configuration page
pub fn render_configure_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw(" Pomodoro duration: "),
            Span::styled(
                format!("{} minutes", app.controller.default_pomodoro_duration()),
                title_style(),
            ),
            Span::styled("   (+ / - to change, 1 to 58)", hint_style()),
        ]),
        Line::raw(""),
        Line::raw(" Tags:"),
    ];

    if app.known_tags.is_empty() {
        lines.push(Line::styled("   none yet", hint_style()));
    } else {
        for tag in &app.known_tags {
            lines.push(Line::from(Span::styled(format!("   [{}]", tag), tag_style())));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " Manage tags with `flow tag add <name>` and `flow tag remove <name>`.",
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Configure ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
