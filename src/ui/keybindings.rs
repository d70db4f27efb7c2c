use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the keys that currently do something
fn hints(app: &AppState) -> Vec<&'static str> {
    if app.ui_mode == UiMode::ContextMenu {
        return vec![" ↑/↓ move   ", "Enter choose   ", "Esc close"];
    }
    if app.controller.index_being_edited().is_some() {
        return vec![" type to rename   ", "Enter save   ", "Esc cancel"];
    }

    vec![
        " ↑/↓ select   ",
        "Enter start/expand   ",
        "Space pause   ",
        "s stop   ",
        "n new   ",
        "e edit   ",
        "Del remove   ",
        "m menu   ",
        "Tab page   ",
        "q quit",
    ]
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let spans: Vec<Span> = hints(app).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
