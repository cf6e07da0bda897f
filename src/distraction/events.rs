use bevy::prelude::*;
use serde::Serialize;

use crate::{owner::state::OwnerState, tasks::types::TaskId};

/// Broadcast when a distraction session starts or ends.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistractionEvent {
    Started {
        prior: OwnerState,
        task: Option<TaskId>,
    },
    Refocused {
        resumed: OwnerState,
        task: Option<TaskId>,
    },
}

/// Asks the distraction coordinator to interrupt the owner now.
#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistractionRequest;
