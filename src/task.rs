//! Task data structure.
//!
//! A `Task` has no identifier of its own; it is addressed by its position
//! in the ordered task list.

use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task")]
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task. `text` is stored as given.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority,
            completed: false,
        }
    }
}
