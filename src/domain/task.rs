use serde::{Deserialize, Serialize};

/// A queued unit of work.
///
/// Tasks have no stable id: a task is identified by its position in the queue,
/// and that position shifts when rows before it are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    /// True when the task sits in today's queue, false for the later queue
    #[serde(default = "default_staged")]
    pub staged: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_staged() -> bool {
    true
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            staged: true,
            tags: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add or remove a tag, keeping the list free of duplicates
    pub fn set_tag(&mut self, tag: &str, enabled: bool) {
        if enabled {
            if !self.has_tag(tag) {
                self.tags.push(tag.to_string());
            }
        } else {
            self.tags.retain(|t| t != tag);
        }
    }
}
