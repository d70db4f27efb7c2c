use crate::app::AppState;
use crate::controller::Key;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    let should_quit = match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::ContextMenu => handle_context_menu_mode(app, key),
    }?;

    app.process_events();
    Ok(should_quit)
}

/// Map a terminal key to the controller's key set
pub fn translate_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Handle keys in normal mode: the controller first, then the keys it leaves alone
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let editing = app.controller.index_being_edited().is_some();

    // Typed text must reach the row before the controller ends the edit
    if editing && key.code == KeyCode::Enter {
        app.commit_edit();
    }

    if let Some(controller_key) = translate_key(key) {
        if app.controller.handle_key_release(controller_key) {
            return Ok(false);
        }
    }

    if editing {
        match key.code {
            KeyCode::Backspace => app.edit_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.edit_push(c),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        // Context menu for the selected task
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.open_context_menu();
            Ok(false)
        }

        KeyCode::Tab => {
            app.next_page();
            Ok(false)
        }

        // Default session length
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.increase_duration();
            Ok(false)
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.decrease_duration();
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while the context menu is open
fn handle_context_menu_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.menu_up(),
        KeyCode::Down => app.menu_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_menu_entry(),
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => app.close_context_menu(),
        _ => {}
    }
    Ok(false)
}
