//! Chore identity, state, and display snapshots.
use std::fmt;

use bevy::prelude::*;
use serde::Serialize;

/// Unique identifier for a chore, assigned in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TaskId(u32);

impl TaskId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task-{:02}", self.0)
    }
}

/// Lifecycle of a chore. Only moves forward: Pending -> InProgress -> Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    #[default]
    Pending,
    InProgress,
    Complete,
}

impl TaskState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Complete => "complete",
        }
    }

    /// Checkbox glyph used by the taskboard.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Pending => "☐",
            Self::InProgress => "▶",
            Self::Complete => "☑",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A chore the owner can be nudged into doing.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub state: TaskState,
    /// Key of the world interactable that resolves to this chore.
    pub item_key: String,
    /// Where the owner stands while doing the chore.
    pub target: Vec2,
    /// Interactable revealed once the chore is done (e.g. the made bed).
    pub reveal_key: Option<String>,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.state == TaskState::Complete
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            state: self.state,
        }
    }
}

/// Read-only view of a chore handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub state: TaskState,
}

impl TaskSummary {
    /// Single taskboard line, e.g. `▶  Wash the dishes`.
    pub fn headline(&self) -> String {
        format!("{}  {}", self.state.glyph(), self.name)
    }
}
