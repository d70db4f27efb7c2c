use crate::app::AppState;
use crate::domain::Task;
use crate::model::TaskStore;
use crate::ui::styles::{
    border_style, default_style, editing_style, later_style, selected_style, tag_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task queue page
pub fn render_queue_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let controller = &app.controller;
    let tasks = controller.queue().tasks();

    let date = Local::now().format("%a %b %d");
    let title = format!(" Queue ({}) · {} ", tasks.len(), date);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let empty = Paragraph::new(Line::raw(" The queue is empty. Press n to add a task."))
            .style(later_style())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let editing = controller.index_being_edited() == Some(idx);
            let line = if editing {
                create_editing_line(&app.edit_buffer)
            } else {
                create_task_line(idx, task)
            };

            let style = if editing {
                editing_style()
            } else if controller.selected_index() == Some(idx) {
                selected_style()
            } else if task.staged {
                default_style()
            } else {
                later_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Format: " 2. Write proposal  [work] [home]  (later)"
fn create_task_line(idx: usize, task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{:>2}. ", idx + 1)),
        Span::raw(task.text.clone()),
    ];

    if !task.tags.is_empty() {
        spans.push(Span::raw(" ".to_string()));
        for tag in &task.tags {
            spans.push(Span::styled(format!(" [{}]", tag), tag_style()));
        }
    }

    if !task.staged {
        spans.push(Span::raw("  (later)".to_string()));
    }

    Line::from(spans)
}

fn create_editing_line(buffer: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ✎  ".to_string()),
        Span::raw(buffer.to_string()),
        Span::styled("▏".to_string(), Style::default()),
    ])
}
