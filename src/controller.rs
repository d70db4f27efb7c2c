use crate::activation::Activator;
use crate::domain::{Page, Task, TaskStatus};
use crate::model::TaskStore;
use crate::settings::{Settings, DEFAULT_POMODORO_DURATION_KEY};
use crate::signal::Signal;
use crate::ticker::{Timer, AFTER_ADDING_TIMEOUT, TICK_INTERVAL};
use std::time::Instant;

/// Session length used when nothing valid is stored
pub const DEFAULT_POMODORO_MINUTES: u32 = 25;

/// Text given to tasks created from the keyboard
pub const NEW_TASK_TEXT: &str = "New Task";

/// State change notifications, emitted after the change they describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    RemainingMinutesChanged(u32),
    TaskTextChanged,
    TaskStatusChanged(TaskStatus),
    CurrentTaskDurationChanged(u32),
    IndexBeingEditedChanged(Option<usize>),
    SelectedIndexChanged(Option<usize>),
    ExpandedChanged(bool),
    CurrentPageChanged(Page),
    DefaultPomodoroDurationChanged(u32),
    FirstSecondsAfterAddingChanged,
    /// The countdown reached zero; carries the finished task's text
    TaskFinished(String),
}

/// Keys understood by [`Controller::handle_key_release`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Delete,
    Up,
    Down,
    Char(char),
}

/// Owns the task queue, the running pomodoro and the panel navigation state
pub struct Controller<S: TaskStore> {
    model: S,
    settings: Box<dyn Settings>,
    activator: Box<dyn Activator>,
    events: Signal<ControllerEvent>,

    current_task: Option<Task>,
    current_task_duration: u32,
    elapsed_minutes: u32,
    task_status: TaskStatus,
    default_pomodoro_duration: u32,
    tick_timer: Timer,
    after_adding_timer: Timer,

    expanded: bool,
    index_being_edited: Option<usize>,
    selected_index: Option<usize>,
    page: Page,
}

fn valid_duration(minutes: i64) -> bool {
    minutes > 0 && minutes < 59
}

impl<S: TaskStore> Controller<S> {
    pub fn new(model: S, settings: Box<dyn Settings>, activator: Box<dyn Activator>) -> Self {
        let stored = settings.int_value(DEFAULT_POMODORO_DURATION_KEY, DEFAULT_POMODORO_MINUTES as i64);
        let default_pomodoro_duration = if valid_duration(stored) {
            stored as u32
        } else {
            tracing::warn!(stored, "ignoring invalid stored pomodoro duration");
            DEFAULT_POMODORO_MINUTES
        };

        Self {
            model,
            settings,
            activator,
            events: Signal::new(),
            current_task: None,
            current_task_duration: 0,
            elapsed_minutes: 0,
            task_status: TaskStatus::Stopped,
            default_pomodoro_duration,
            tick_timer: Timer::repeating(TICK_INTERVAL),
            after_adding_timer: Timer::single_shot(AFTER_ADDING_TIMEOUT),
            expanded: false,
            index_being_edited: None,
            selected_index: None,
            page: Page::Queue,
        }
    }

    pub fn events(&self) -> &Signal<ControllerEvent> {
        &self.events
    }

    fn emit(&self, event: ControllerEvent) {
        self.events.emit(&event);
    }

    pub fn queue(&self) -> &S {
        &self.model
    }

    // ---- session -------------------------------------------------------

    pub fn remaining_minutes(&self) -> u32 {
        self.current_task_duration.saturating_sub(self.elapsed_minutes)
    }

    pub fn current_task_duration(&self) -> u32 {
        self.current_task_duration
    }

    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_minutes
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.current_task.as_ref()
    }

    pub fn task_text(&self) -> &str {
        self.current_task.as_ref().map(|t| t.text.as_str()).unwrap_or("")
    }

    pub fn task_status(&self) -> TaskStatus {
        self.task_status
    }

    pub fn running(&self) -> bool {
        self.task_status == TaskStatus::Started
    }

    pub fn paused(&self) -> bool {
        self.task_status == TaskStatus::Paused
    }

    pub fn stopped(&self) -> bool {
        self.task_status == TaskStatus::Stopped
    }

    /// True for a short moment after a session starts
    pub fn first_seconds_after_adding(&self) -> bool {
        self.after_adding_timer.is_active()
    }

    /// Dequeue the task at `queue_index` and start a session on it.
    ///
    /// An active session is stopped first and its task requeued. An index
    /// outside the queue changes nothing.
    pub fn start_pomodoro(&mut self, queue_index: usize) {
        if queue_index >= self.model.count() {
            tracing::debug!(queue_index, count = self.model.count(), "start ignored: index out of range");
            return;
        }

        self.stop_pomodoro(true);

        let Some(task) = self.model.remove_task(queue_index) else {
            return;
        };
        tracing::info!(task = %task.text, minutes = self.default_pomodoro_duration, "starting pomodoro");

        self.current_task = Some(task);
        self.elapsed_minutes = 0;
        self.current_task_duration = self.default_pomodoro_duration;

        self.set_expanded(false);
        self.set_selected_index(None);

        let now = Instant::now();
        self.tick_timer.start(now);
        self.after_adding_timer.start(now);
        self.emit(ControllerEvent::FirstSecondsAfterAddingChanged);

        self.set_task_status(TaskStatus::Started);
    }

    pub fn stop_pomodoro(&mut self, requeue: bool) {
        if self.task_status == TaskStatus::Stopped {
            return;
        }

        if let Some(task) = self.current_task.take() {
            if requeue && !task.text.is_empty() {
                self.requeue(task);
            } else {
                tracing::info!(task = %task.text, "pomodoro stopped, task dropped");
            }
        }

        self.tick_timer.stop();
        self.elapsed_minutes = 0;

        self.set_task_status(TaskStatus::Stopped);
    }

    /// Return a task to the end of the queue, keeping its queue and tags
    fn requeue(&mut self, task: Task) {
        tracing::info!(task = %task.text, "requeueing task");
        self.add_task(&task.text, false);
        let Some(last) = self.model.count().checked_sub(1) else {
            tracing::warn!(task = %task.text, "queue declined the requeued task");
            return;
        };
        self.model.set_staged(last, task.staged);
        self.model.set_tags(last, task.tags);
    }

    /// Toggle between running and paused
    pub fn pause_pomodoro(&mut self) {
        match self.task_status {
            TaskStatus::Paused => {
                self.tick_timer.start(Instant::now());
                self.set_task_status(TaskStatus::Started);
            }
            TaskStatus::Started => {
                self.tick_timer.stop();
                self.set_task_status(TaskStatus::Paused);
            }
            TaskStatus::Stopped => {}
        }
    }

    /// Advance the running session by one minute
    pub fn on_timer_tick(&mut self) {
        if self.task_status != TaskStatus::Started {
            return;
        }

        self.elapsed_minutes += 1;
        self.emit(ControllerEvent::RemainingMinutesChanged(self.remaining_minutes()));

        if self.remaining_minutes() == 0 {
            let text = self.task_text().to_string();
            self.stop_pomodoro(true);
            tracing::info!(task = %text, "pomodoro finished");
            self.emit(ControllerEvent::TaskFinished(text));
        }
    }

    /// Fire whatever timers are due at `now`
    pub fn poll_timers(&mut self, now: Instant) {
        for _ in 0..self.tick_timer.poll(now) {
            self.on_timer_tick();
            if !self.running() {
                break;
            }
        }

        if self.after_adding_timer.poll(now) > 0 {
            self.emit(ControllerEvent::FirstSecondsAfterAddingChanged);
        }
    }

    fn set_task_status(&mut self, status: TaskStatus) {
        if status != self.task_status {
            self.task_status = status;
            self.emit(ControllerEvent::TaskTextChanged);
            self.emit(ControllerEvent::RemainingMinutesChanged(self.remaining_minutes()));
            self.emit(ControllerEvent::TaskStatusChanged(status));
            self.emit(ControllerEvent::CurrentTaskDurationChanged(self.current_task_duration));
        }
    }

    pub fn default_pomodoro_duration(&self) -> u32 {
        self.default_pomodoro_duration
    }

    /// Accepts 1..=58 minutes and persists the new value
    pub fn set_default_pomodoro_duration(&mut self, minutes: u32) {
        if self.apply_default_duration(minutes) {
            self.settings
                .set_value(DEFAULT_POMODORO_DURATION_KEY, serde_json::Value::from(minutes));
        }
    }

    /// Like [`Self::set_default_pomodoro_duration`] but only for this run
    pub fn override_default_pomodoro_duration(&mut self, minutes: u32) {
        self.apply_default_duration(minutes);
    }

    fn apply_default_duration(&mut self, minutes: u32) -> bool {
        if minutes == self.default_pomodoro_duration || !valid_duration(minutes as i64) {
            return false;
        }
        self.default_pomodoro_duration = minutes;
        self.emit(ControllerEvent::DefaultPomodoroDurationChanged(minutes));
        true
    }

    // ---- queue ---------------------------------------------------------

    /// Append a task. With `open_editor` the panel expands and the new row
    /// goes straight into edit mode.
    pub fn add_task(&mut self, text: &str, open_editor: bool) {
        self.model.add_task(text);
        self.set_index_being_edited(None);

        if open_editor {
            self.set_expanded(true);
            let last = self.model.row_count().checked_sub(1);
            self.set_index_being_edited(last);
        }
    }

    pub fn remove_task(&mut self, index: usize) {
        self.set_index_being_edited(None);
        if self.model.remove_task(index).is_none() {
            return;
        }

        // Follow the selected task as rows shift up, and keep it on a row that still exists
        if let Some(selected) = self.selected_index {
            let shifted = if index < selected { selected - 1 } else { selected };
            let last = self.model.count().checked_sub(1);
            self.set_selected_index(last.map(|last| shifted.min(last)));
        }
    }

    pub fn update_task(&mut self, index: usize, text: &str) {
        self.model.update_task(index, text);
    }

    pub fn set_staged(&mut self, index: usize, staged: bool) {
        self.model.set_staged(index, staged);
    }

    pub fn set_tags(&mut self, index: usize, tags: Vec<String>) {
        self.model.set_tags(index, tags);
    }

    // ---- navigation ----------------------------------------------------

    pub fn index_being_edited(&self) -> Option<usize> {
        self.index_being_edited
    }

    /// Setting the row already being edited stops editing. Editing a row
    /// expands the panel first.
    pub fn set_index_being_edited(&mut self, index: Option<usize>) {
        let new_index = if self.index_being_edited == index { None } else { index };

        if new_index.is_some() && !self.expanded {
            self.set_expanded(true);
        }

        if new_index != self.index_being_edited {
            self.index_being_edited = new_index;
            self.emit(ControllerEvent::IndexBeingEditedChanged(new_index));
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        if index != self.selected_index {
            self.selected_index = index;
            self.emit(ControllerEvent::SelectedIndexChanged(index));
        }
    }

    pub fn toggle_selected_index(&mut self, index: usize) {
        if self.selected_index == Some(index) {
            self.set_selected_index(None);
        } else {
            self.set_selected_index(Some(index));
        }
    }

    pub fn cycle_selection_up(&mut self) {
        match self.selected_index {
            None => {
                let last = self.model.count().checked_sub(1);
                self.set_selected_index(last);
            }
            Some(selected) if selected > 0 => self.set_selected_index(Some(selected - 1)),
            Some(_) => {}
        }
    }

    pub fn cycle_selection_down(&mut self) {
        let count = self.model.count();
        if count == 0 {
            return;
        }

        match self.selected_index {
            None => self.set_selected_index(Some(0)),
            Some(selected) if selected + 1 < count => self.set_selected_index(Some(selected + 1)),
            Some(_) => {}
        }
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        if expanded == self.expanded {
            return;
        }

        self.expanded = expanded;
        if expanded {
            self.activator.request_activate();
        } else {
            self.set_index_being_edited(None);
        }
        self.set_selected_index(None);
        self.emit(ControllerEvent::ExpandedChanged(expanded));
    }

    pub fn current_page(&self) -> Page {
        self.page
    }

    pub fn set_current_page(&mut self, page: Page) {
        if page != self.page {
            self.page = page;
            self.emit(ControllerEvent::CurrentPageChanged(page));
        }
    }

    // ---- keyboard ------------------------------------------------------

    /// Dispatch a released key. Returns true when the key was consumed.
    ///
    /// While a row is being edited only Escape (cancel) and Enter (commit)
    /// are handled; everything else is left to the caller.
    pub fn handle_key_release(&mut self, key: Key) -> bool {
        let editing = self.index_being_edited.is_some();

        if editing && !matches!(key, Key::Escape | Key::Enter) {
            return false;
        }

        match key {
            Key::Escape => {
                if editing {
                    self.set_index_being_edited(None);
                } else {
                    self.set_expanded(false);
                }
                true
            }
            Key::Enter => {
                if let Some(index) = self.index_being_edited {
                    self.set_index_being_edited(None);
                    self.set_selected_index(Some(index));
                } else if let Some(selected) = self.selected_index {
                    self.start_pomodoro(selected);
                    self.set_expanded(false);
                } else {
                    self.set_expanded(true);
                }
                true
            }
            Key::Space => {
                self.pause_pomodoro();
                true
            }
            // Requeues the task, same as the stop button
            Key::Char('s') | Key::Char('S') => {
                self.stop_pomodoro(true);
                true
            }
            Key::Char('n') | Key::Char('N') => {
                self.set_expanded(true);
                self.add_task(NEW_TASK_TEXT, true);
                true
            }
            Key::Delete => {
                match self.selected_index {
                    Some(selected) => self.remove_task(selected),
                    None => self.stop_pomodoro(false),
                }
                true
            }
            Key::Up => {
                self.cycle_selection_up();
                true
            }
            Key::Down => {
                self.cycle_selection_down();
                true
            }
            Key::Char('e') | Key::Char('E') => match self.selected_index {
                Some(selected) => {
                    self.set_index_being_edited(Some(selected));
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}
