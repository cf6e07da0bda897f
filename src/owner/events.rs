//! Owner command channel and state notifications.
use std::{fmt, time::Duration};

use bevy::prelude::*;
use serde::Serialize;

use crate::tasks::types::TaskId;

use super::state::OwnerState;

/// Handle for the owner's single in-flight command.
///
/// Completions carrying any other handle are stale and ignored, which is what
/// makes cancelling a command safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActionHandle(u64);

impl ActionHandle {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Commands the coordinators issue to whatever moves and animates the owner.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum OwnerCommand {
    MoveTo {
        handle: ActionHandle,
        target: Vec2,
    },
    PlayTimedEffect {
        handle: ActionHandle,
        duration: Duration,
    },
    /// Freeze the command, keeping its progress.
    Suspend {
        handle: ActionHandle,
    },
    Resume {
        handle: ActionHandle,
    },
    Cancel {
        handle: ActionHandle,
    },
}

impl OwnerCommand {
    pub fn handle(&self) -> ActionHandle {
        match self {
            Self::MoveTo { handle, .. }
            | Self::PlayTimedEffect { handle, .. }
            | Self::Suspend { handle }
            | Self::Resume { handle }
            | Self::Cancel { handle } => *handle,
        }
    }
}

/// Reported by the actuator when a `MoveTo` or `PlayTimedEffect` finishes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerActionFinished {
    pub handle: ActionHandle,
}

/// Fired when the owner's behavioural state changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerStateChangedEvent {
    pub from: OwnerState,
    pub to: OwnerState,
    pub task: Option<TaskId>,
}
