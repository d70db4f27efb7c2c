use crate::activation::Activator;
use crate::controller::{Controller, ControllerEvent};
use crate::domain::{Page, UiMode};
use crate::model::{CheckableTagModel, MenuOption, TaskContextMenuModel, TaskModel, TaskStore};
use crate::notifications;
use crate::persistence::{save_queue, QueueFile};
use crate::settings::Settings;
use anyhow::Result;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Open context menu for one queued task
pub struct ContextMenuState {
    pub task_index: usize,
    pub model: TaskContextMenuModel<CheckableTagModel>,
    pub cursor: usize,
}

/// Main application state
pub struct AppState {
    pub controller: Controller<TaskModel>,
    pub known_tags: Vec<String>,
    pub ui_mode: UiMode,
    pub menu: Option<ContextMenuState>,
    /// Text of the row being edited
    pub edit_buffer: String,
    /// The next typed character replaces the buffer instead of appending
    pub edit_replace: bool,
    pub status_message: Option<String>,
    pending_events: Rc<RefCell<Vec<ControllerEvent>>>,
    queue_path: Option<PathBuf>,
    last_saved: QueueFile,
}

impl AppState {
    pub fn new(
        queue: QueueFile,
        settings: Box<dyn Settings>,
        activator: Box<dyn Activator>,
        queue_path: Option<PathBuf>,
    ) -> Self {
        let last_saved = queue.clone();
        let controller = Controller::new(TaskModel::new(queue.tasks), settings, activator);

        let pending_events = Rc::new(RefCell::new(Vec::new()));
        let sink = pending_events.clone();
        controller
            .events()
            .connect(move |event: &ControllerEvent| sink.borrow_mut().push(event.clone()));

        Self {
            controller,
            known_tags: queue.tags,
            ui_mode: UiMode::Normal,
            menu: None,
            edit_buffer: String::new(),
            edit_replace: false,
            status_message: None,
            pending_events,
            queue_path,
            last_saved,
        }
    }

    /// React to controller notifications collected since the last call
    pub fn process_events(&mut self) {
        let events: Vec<ControllerEvent> = self.pending_events.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                ControllerEvent::IndexBeingEditedChanged(Some(index)) => {
                    self.edit_buffer = self
                        .controller
                        .queue()
                        .at(index)
                        .map(|task| task.text)
                        .unwrap_or_default();
                    self.edit_replace = true;
                }
                ControllerEvent::IndexBeingEditedChanged(None) => {
                    self.edit_buffer.clear();
                    self.edit_replace = false;
                }
                ControllerEvent::TaskFinished(text) => {
                    notifications::notify_task_finished(&text);
                    self.status_message = Some(format!("Finished: {}", text));
                }
                ControllerEvent::TaskStatusChanged(status) => {
                    tracing::debug!(?status, "task status changed");
                    self.status_message = None;
                }
                other => tracing::trace!(event = ?other, "controller event"),
            }
        }
    }

    // ---- editing -------------------------------------------------------

    pub fn edit_push(&mut self, c: char) {
        if self.edit_replace {
            self.edit_buffer.clear();
            self.edit_replace = false;
        }
        self.edit_buffer.push(c);
    }

    pub fn edit_backspace(&mut self) {
        if self.edit_replace {
            self.edit_buffer.clear();
            self.edit_replace = false;
        } else {
            self.edit_buffer.pop();
        }
    }

    /// Write the edit buffer to the row being edited. Blank text keeps the old text.
    pub fn commit_edit(&mut self) {
        let Some(index) = self.controller.index_being_edited() else {
            return;
        };
        let text = self.edit_buffer.trim();
        if !text.is_empty() {
            let text = text.to_string();
            self.controller.update_task(index, &text);
        }
    }

    // ---- pages ---------------------------------------------------------

    pub fn next_page(&mut self) {
        self.controller.set_expanded(true);
        let next = self.controller.current_page().next();
        self.controller.set_current_page(next);
    }

    pub fn increase_duration(&mut self) {
        let minutes = self.controller.default_pomodoro_duration() + 1;
        self.controller.set_default_pomodoro_duration(minutes);
    }

    pub fn decrease_duration(&mut self) {
        let minutes = self.controller.default_pomodoro_duration().saturating_sub(1);
        self.controller.set_default_pomodoro_duration(minutes);
    }

    // ---- context menu --------------------------------------------------

    /// Open the context menu for the selected task
    pub fn open_context_menu(&mut self) {
        let Some(task_index) = self.controller.selected_index() else {
            self.status_message = Some("Select a task first".to_string());
            return;
        };
        let Some(task) = self.controller.queue().at(task_index) else {
            return;
        };

        let tags = Rc::new(CheckableTagModel::new(&self.known_tags, &task.tags));
        let model = TaskContextMenuModel::new(Rc::new(RefCell::new(task)), tags);
        self.menu = Some(ContextMenuState {
            task_index,
            model,
            cursor: 0,
        });
        self.ui_mode = UiMode::ContextMenu;
    }

    /// Close the menu, keeping the tag choices made in it
    pub fn close_context_menu(&mut self) {
        if let Some(menu) = self.menu.take() {
            let tags = menu.model.tags().checked_tags();
            self.controller.set_tags(menu.task_index, tags);
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn menu_up(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.cursor = menu.cursor.saturating_sub(1);
        }
    }

    pub fn menu_down(&mut self) {
        if let Some(menu) = &mut self.menu {
            if menu.cursor + 1 < menu.model.len() {
                menu.cursor += 1;
            }
        }
    }

    /// Run the action under the menu cursor
    pub fn activate_menu_entry(&mut self) {
        let Some(menu) = &self.menu else {
            return;
        };
        let task_index = menu.task_index;
        let cursor = menu.cursor;

        match menu.model.option_at(cursor) {
            Some(MenuOption::Edit) => {
                self.close_context_menu();
                self.controller.set_index_being_edited(Some(task_index));
            }
            Some(MenuOption::Delete) => {
                self.menu = None;
                self.ui_mode = UiMode::Normal;
                self.controller.remove_task(task_index);
            }
            Some(MenuOption::ConfigureTags) => {
                self.close_context_menu();
                self.controller.set_expanded(true);
                self.controller.set_current_page(Page::Configure);
            }
            Some(MenuOption::Queue) => {
                let staged = {
                    let mut task = menu.model.task().borrow_mut();
                    task.staged = !task.staged;
                    task.staged
                };
                self.controller.set_staged(task_index, staged);
            }
            None => {
                if let Some(tag_row) = menu.model.tag_row(cursor) {
                    menu.model.tags().toggle(tag_row);
                }
            }
        }
    }

    // ---- persistence ---------------------------------------------------

    pub fn queue_file(&self) -> QueueFile {
        QueueFile {
            tasks: self.controller.queue().tasks().to_vec(),
            tags: self.known_tags.clone(),
        }
    }

    /// Write the queue if it changed since the last save
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = &self.queue_path else {
            return Ok(());
        };

        let queue = self.queue_file();
        if queue == self.last_saved {
            return Ok(());
        }

        save_queue(path, &queue)?;
        tracing::debug!(tasks = queue.tasks.len(), "queue saved");
        self.last_saved = queue;
        Ok(())
    }

    /// Put a running task back in the queue and write the queue out
    pub fn shutdown(&mut self) -> Result<()> {
        self.controller.stop_pomodoro(true);
        self.process_events();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::CountingActivator;
    use crate::domain::Task;
    use crate::persistence::load_queue;
    use crate::settings::MemorySettings;
    use pretty_assertions::assert_eq;

    fn create_test_app() -> AppState {
        let queue = QueueFile {
            tasks: vec![Task::new("A"), Task::new("B")],
            tags: vec!["home".to_string(), "work".to_string()],
        };
        AppState::new(
            queue,
            Box::new(MemorySettings::new()),
            Box::new(CountingActivator::default()),
            None,
        )
    }

    #[test]
    fn test_edit_buffer_follows_edited_row() {
        let mut app = create_test_app();
        app.controller.set_index_being_edited(Some(1));
        app.process_events();
        assert_eq!(app.edit_buffer, "B");
        assert!(app.edit_replace);

        app.edit_push('C');
        app.edit_push('D');
        assert_eq!(app.edit_buffer, "CD");
        app.edit_backspace();
        app.commit_edit();
        assert_eq!(app.controller.queue().at(1).unwrap().text, "C");
    }

    #[test]
    fn test_blank_edit_keeps_text() {
        let mut app = create_test_app();
        app.controller.set_index_being_edited(Some(0));
        app.process_events();
        app.edit_backspace();
        app.commit_edit();
        assert_eq!(app.controller.queue().at(0).unwrap().text, "A");
    }

    #[test]
    fn test_context_menu_requires_selection() {
        let mut app = create_test_app();
        app.open_context_menu();
        assert!(app.menu.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_context_menu_toggles_tags_and_queue() {
        let mut app = create_test_app();
        app.controller.set_selected_index(Some(0));
        app.open_context_menu();
        assert_eq!(app.ui_mode, UiMode::ContextMenu);
        assert_eq!(app.menu.as_ref().unwrap().model.len(), 6);

        // Queue action
        for _ in 0..3 {
            app.menu_down();
        }
        app.activate_menu_entry();
        assert!(!app.controller.queue().at(0).unwrap().staged);
        let label = app.menu.as_ref().unwrap().model.entry_at(3).unwrap().text;
        assert_eq!(label, "Move to today's queue");

        // "work" tag
        app.menu_down();
        app.menu_down();
        app.activate_menu_entry();
        app.close_context_menu();

        assert_eq!(app.controller.queue().at(0).unwrap().tags, vec!["work".to_string()]);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_context_menu_delete() {
        let mut app = create_test_app();
        app.controller.set_selected_index(Some(1));
        app.open_context_menu();
        app.menu_down();
        app.activate_menu_entry();

        assert!(app.menu.is_none());
        assert_eq!(app.controller.queue().count(), 1);
    }

    #[test]
    fn test_context_menu_configure_tags_opens_page() {
        let mut app = create_test_app();
        app.controller.set_selected_index(Some(0));
        app.open_context_menu();
        app.menu_down();
        app.menu_down();
        app.activate_menu_entry();

        assert_eq!(app.controller.current_page(), Page::Configure);
        assert!(app.controller.expanded());
    }

    #[test]
    fn test_menu_cursor_stays_in_range() {
        let mut app = create_test_app();
        app.controller.set_selected_index(Some(0));
        app.open_context_menu();
        app.menu_up();
        assert_eq!(app.menu.as_ref().unwrap().cursor, 0);
        for _ in 0..20 {
            app.menu_down();
        }
        assert_eq!(app.menu.as_ref().unwrap().cursor, 5);
    }

    #[test]
    fn test_duration_adjustment() {
        let mut app = create_test_app();
        app.increase_duration();
        assert_eq!(app.controller.default_pomodoro_duration(), 26);
        app.decrease_duration();
        app.decrease_duration();
        assert_eq!(app.controller.default_pomodoro_duration(), 24);
    }

    #[test]
    fn test_next_page_expands() {
        let mut app = create_test_app();
        app.next_page();
        assert!(app.controller.expanded());
        assert_eq!(app.controller.current_page(), Page::Configure);
    }

    #[test]
    fn test_task_finished_sets_status_message() {
        let mut app = create_test_app();
        app.controller.set_default_pomodoro_duration(1);
        app.controller.start_pomodoro(0);
        app.controller.on_timer_tick();
        app.process_events();
        assert_eq!(app.status_message.as_deref(), Some("Finished: A"));
    }

    #[test]
    fn test_save_and_shutdown_requeue() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("queue.json");
        let mut app = AppState::new(
            QueueFile {
                tasks: vec![Task::new("A"), Task::new("B")],
                tags: Vec::new(),
            },
            Box::new(MemorySettings::new()),
            Box::new(CountingActivator::default()),
            Some(path.clone()),
        );

        app.controller.start_pomodoro(0);
        app.save().unwrap();
        assert_eq!(load_queue(&path).unwrap().tasks, vec![Task::new("B")]);

        app.shutdown().unwrap();
        assert_eq!(
            load_queue(&path).unwrap().tasks,
            vec![Task::new("B"), Task::new("A")]
        );
    }
}
