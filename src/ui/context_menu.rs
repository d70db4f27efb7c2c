use crate::app::AppState;
use crate::model::TaskStore;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// Render the context menu popup for the task it was opened on
pub fn render_context_menu(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(menu) = &app.menu else {
        return;
    };

    let entries = menu.model.entries();
    let modal_area = create_modal_area(area, entries.len() as u16 + 2);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            let marker = match (entry.checkable, entry.checked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, _) => "   ",
            };
            let line = Line::from(vec![
                Span::raw(format!(" {} ", marker)),
                Span::raw(format!("{:<2}", entry.icon)),
                Span::raw(entry.text.clone()),
            ]);
            let item = ListItem::new(line);
            if row == menu.cursor {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    let task_text = app
        .controller
        .queue()
        .at(menu.task_index)
        .map(|task| task.text)
        .unwrap_or_default();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!(" {} ", task_text), modal_title_style()))
            .style(modal_bg_style()),
    );

    f.render_widget(list, modal_area);
}
