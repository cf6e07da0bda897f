//! Completion observer: fires the ending once every chore is done.
use bevy::prelude::*;
use serde::Serialize;

use crate::tasks::registry::TaskRegistry;

/// Sent exactly once per session, when the last chore completes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndingReachedEvent {
    pub completed: usize,
}

#[derive(Resource, Debug, Default)]
pub struct CompletionObserver {
    fired: bool,
}

impl CompletionObserver {
    /// Returns `true` the first time the registry is found all complete.
    /// Later calls are no-ops. An empty registry never ends the session.
    pub fn check_ending(&mut self, tasks: &TaskRegistry) -> bool {
        if self.fired || tasks.is_empty() || !tasks.all_complete() {
            return false;
        }
        self.fired = true;
        true
    }
}
