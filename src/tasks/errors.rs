//! Rejection reasons for chore state transitions.
use std::fmt;

use super::types::{TaskId, TaskState};

/// Why the registry refused a transition. Callers absorb these as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTransitionError {
    UnknownTask {
        id: TaskId,
    },
    /// Another chore already holds the single in-progress slot.
    AnotherActive {
        requested: TaskId,
        active: TaskId,
    },
    WrongState {
        id: TaskId,
        expected: TaskState,
        actual: TaskState,
    },
}

impl TaskTransitionError {
    pub fn wrong_state(id: TaskId, expected: TaskState, actual: TaskState) -> Self {
        Self::WrongState {
            id,
            expected,
            actual,
        }
    }
}

impl fmt::Display for TaskTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTask { id } => write!(f, "Unknown task {}", id),
            Self::AnotherActive { requested, active } => write!(
                f,
                "Cannot start {}: {} is already in progress",
                requested, active
            ),
            Self::WrongState {
                id,
                expected,
                actual,
            } => write!(f, "{} is {} (expected {})", id, actual, expected),
        }
    }
}

impl std::error::Error for TaskTransitionError {}
