//! Explicit coordination context shared by the interaction and distraction coordinators.
use bevy::{ecs::system::SystemParam, prelude::*};

use crate::{
    distraction::events::DistractionEvent,
    owner::{
        events::{OwnerCommand, OwnerStateChangedEvent},
        state::OwnerBehavior,
    },
    tasks::{events::TaskStateChangedEvent, registry::TaskRegistry},
};

/// Who a transient notice should appear above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    Player,
    Owner,
}

/// Fire-and-forget feedback for the presentation layer.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub speaker: Speaker,
    pub text: String,
}

impl Notice {
    /// Short prompt above the player, e.g. `Wash the dishes...`.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }

    /// Line spoken by the owner.
    pub fn owner_line(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Owner,
            text: text.into(),
        }
    }
}

/// Everything a coordination step produced, flushed to messages by the calling system.
#[derive(Debug, Default)]
pub struct Outbox {
    pub commands: Vec<OwnerCommand>,
    pub notices: Vec<Notice>,
    pub task_changes: Vec<TaskStateChangedEvent>,
    pub owner_changes: Vec<OwnerStateChangedEvent>,
    pub distractions: Vec<DistractionEvent>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.notices.is_empty()
            && self.task_changes.is_empty()
            && self.owner_changes.is_empty()
            && self.distractions.is_empty()
    }

    pub fn flush(self, writers: &mut OutboxWriters) {
        for command in self.commands {
            writers.commands.write(command);
        }
        for notice in self.notices {
            writers.notices.write(notice);
        }
        for change in self.task_changes {
            writers.task_changes.write(change);
        }
        for change in self.owner_changes {
            writers.owner_changes.write(change);
        }
        for event in self.distractions {
            writers.distractions.write(event);
        }
    }
}

/// Message writers an `Outbox` drains into.
#[derive(SystemParam)]
pub struct OutboxWriters<'w> {
    commands: MessageWriter<'w, OwnerCommand>,
    notices: MessageWriter<'w, Notice>,
    task_changes: MessageWriter<'w, TaskStateChangedEvent>,
    owner_changes: MessageWriter<'w, OwnerStateChangedEvent>,
    distractions: MessageWriter<'w, DistractionEvent>,
}

/// Mutable engine state handed to coordinator operations.
///
/// Built once per system run from the registry and owner resources; tests
/// build it from plain locals.
pub struct EngineContext<'a> {
    pub tasks: &'a mut TaskRegistry,
    pub owner: &'a mut OwnerBehavior,
    pub outbox: &'a mut Outbox,
}

impl<'a> EngineContext<'a> {
    pub fn new(
        tasks: &'a mut TaskRegistry,
        owner: &'a mut OwnerBehavior,
        outbox: &'a mut Outbox,
    ) -> Self {
        Self {
            tasks,
            owner,
            outbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_target_their_speaker() {
        assert_eq!(Notice::prompt("Sweep...").speaker, Speaker::Player);
        assert_eq!(Notice::owner_line("I can do this.").speaker, Speaker::Owner);
        assert!(Outbox::default().is_empty());
    }
}
