use crate::domain::Task;

/// Storage for the ordered queue of pending tasks.
///
/// All index arguments are queue positions; out-of-range indices are ignored.
pub trait TaskStore {
    fn at(&self, index: usize) -> Option<Task>;

    fn count(&self) -> usize;

    /// Number of rows shown for the queue. Equal to `count` for a flat queue.
    fn row_count(&self) -> usize {
        self.count()
    }

    fn add_task(&mut self, text: &str);

    fn remove_task(&mut self, index: usize) -> Option<Task>;

    fn update_task(&mut self, index: usize, text: &str);

    fn set_staged(&mut self, index: usize, staged: bool);

    fn set_tags(&mut self, index: usize, tags: Vec<String>);

    fn tasks(&self) -> &[Task];
}

/// In-memory queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskModel {
    tasks: Vec<Task>,
}

impl TaskModel {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(Task::new).collect())
    }
}

impl TaskStore for TaskModel {
    fn at(&self, index: usize) -> Option<Task> {
        self.tasks.get(index).cloned()
    }

    fn count(&self) -> usize {
        self.tasks.len()
    }

    fn add_task(&mut self, text: &str) {
        self.tasks.push(Task::new(text));
    }

    fn remove_task(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    fn update_task(&mut self, index: usize, text: &str) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.text = text.to_string();
        }
    }

    fn set_staged(&mut self, index: usize, staged: bool) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.staged = staged;
        }
    }

    fn set_tags(&mut self, index: usize, tags: Vec<String>) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.tags = tags;
        }
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
