pub mod about_pane;
pub mod configure_pane;
pub mod context_menu;
pub mod keybindings;
pub mod layout;
pub mod progress;
pub mod queue_pane;
pub mod status_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Page, UiMode};
use about_pane::render_about_pane;
use configure_pane::render_configure_pane;
use context_menu::render_context_menu;
use keybindings::render_keybindings;
use layout::create_layout;
use queue_pane::render_queue_pane;
use ratatui::Frame;
use status_pane::render_status_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.controller.expanded());

    render_keybindings(f, app, layout.keybindings_area);
    render_status_pane(f, app, layout.status_area);

    if let Some(page_area) = layout.page_area {
        match app.controller.current_page() {
            Page::Queue => render_queue_pane(f, app, page_area),
            Page::Configure => render_configure_pane(f, app, page_area),
            Page::About => render_about_pane(f, page_area),
        }
    }

    if app.ui_mode == UiMode::ContextMenu {
        render_context_menu(f, app, size);
    }
}
