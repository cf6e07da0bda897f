//! Inputs and results of an interaction check.
use bevy::prelude::*;

use crate::tasks::types::TaskId;

/// Snapshot of one interactable the player might be standing next to.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractableProbe {
    pub key: String,
    pub position: Vec2,
    pub visible: bool,
}

impl InteractableProbe {
    pub fn new(key: impl Into<String>, position: Vec2, visible: bool) -> Self {
        Self {
            key: key.into(),
            position,
            visible,
        }
    }
}

/// What a single interaction press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The owner is walking or cleaning.
    OwnerBusy,
    /// The press ended a distraction instead of starting a chore.
    Refocused { resumed: Option<TaskId> },
    NothingInRange,
    /// The nearest chore could not start (another chore is in progress, or it is done).
    Rejected { task: TaskId },
    Triggered { task: TaskId },
}

/// Raised by the input layer once per interaction key press.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct InteractionRequest {
    pub actor_position: Vec2,
}
