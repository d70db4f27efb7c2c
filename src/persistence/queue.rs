use crate::domain::Task;
use crate::persistence::{atomic_write, read_file, PersistenceError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of queue.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Every tag known to the application, in display order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QueueFile {
    /// Register a tag. Returns false if it was already known.
    pub fn add_tag(&mut self, name: &str) -> bool {
        if self.tags.iter().any(|t| t == name) {
            return false;
        }
        self.tags.push(name.to_string());
        self.tags.sort();
        true
    }

    /// Forget a tag and strip it from every task
    pub fn remove_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != name);
        for task in &mut self.tasks {
            task.set_tag(name, false);
        }
        self.tags.len() != before
    }
}

/// Load the queue; a missing or empty file is an empty queue
pub fn load_queue<P: AsRef<Path>>(path: P) -> Result<QueueFile> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(QueueFile::default());
    }

    let queue = serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(queue)
}

pub fn save_queue<P: AsRef<Path>>(path: P, queue: &QueueFile) -> Result<()> {
    let json = serde_json::to_string_pretty(queue)?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_queue() {
        let temp_dir = tempdir().unwrap();
        let queue = load_queue(temp_dir.path().join("queue.json")).unwrap();
        assert_eq!(queue, QueueFile::default());
    }

    #[test]
    fn test_save_and_load_queue() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("queue.json");

        let mut later = Task::new("Later");
        later.staged = false;
        later.tags = vec!["home".to_string()];
        let queue = QueueFile {
            tasks: vec![Task::new("Now"), later],
            tags: vec!["home".to_string(), "work".to_string()],
        };

        save_queue(&path, &queue).unwrap();
        assert_eq!(load_queue(&path).unwrap(), queue);
    }

    #[test]
    fn test_corrupt_queue_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("queue.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_queue(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PersistenceError>(),
            Some(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_tags() {
        let mut queue = QueueFile::default();
        assert!(queue.add_tag("work"));
        assert!(queue.add_tag("home"));
        assert!(!queue.add_tag("work"));
        assert_eq!(queue.tags, vec!["home".to_string(), "work".to_string()]);

        let mut task = Task::new("A");
        task.set_tag("work", true);
        queue.tasks.push(task);

        assert!(queue.remove_tag("work"));
        assert!(!queue.remove_tag("work"));
        assert!(queue.tasks[0].tags.is_empty());
    }
}
