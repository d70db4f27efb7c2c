use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the current-session pane
const STATUS_HEIGHT: u16 = 9;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub status_area: Rect,
    /// Present only while the panel is expanded
    pub page_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Current session pane
/// - Page area (queue / configure / about) when expanded
pub fn create_layout(area: Rect, expanded: bool) -> MainLayout {
    if !expanded {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Min(0),
            ])
            .split(area);

        return MainLayout {
            keybindings_area: chunks[0],
            status_area: chunks[1],
            page_area: None,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(3),
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        status_area: chunks[1],
        page_area: Some(chunks[2]),
    }
}

/// Create a centered popup area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
