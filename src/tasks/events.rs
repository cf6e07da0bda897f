//! Chore events broadcast to observers and presentation.
use bevy::prelude::Message;

use super::types::{TaskId, TaskState};

/// Fired whenever a chore moves to a new state.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct TaskStateChangedEvent {
    pub task: TaskId,
    pub name: String,
    pub from: TaskState,
    pub to: TaskState,
}

impl TaskStateChangedEvent {
    pub fn completed(&self) -> bool {
        self.to == TaskState::Complete
    }
}
