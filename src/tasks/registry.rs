//! Task registry owning every chore and the single in-progress slot.
use std::collections::HashMap;

use bevy::prelude::*;

use super::{
    data::{ChoreCatalog, ChoreDefinition},
    errors::TaskTransitionError,
    events::TaskStateChangedEvent,
    types::{Task, TaskId, TaskState, TaskSummary},
};

/// Ordered chore list plus an item-key index for proximity lookups.
///
/// At most one chore is `InProgress` at any time. Starting a second chore is
/// rejected rather than queued or swapped in.
#[derive(Resource, Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    by_item_key: HashMap<String, TaskId>,
    next_id: u32,
}

impl TaskRegistry {
    pub fn from_catalog(catalog: &ChoreCatalog) -> Self {
        let mut registry = Self::default();
        for definition in catalog.chores() {
            registry.add(definition);
        }
        registry
    }

    /// Appends a pending chore and indexes its item key.
    ///
    /// A key already claimed by another chore keeps pointing at the first one.
    pub fn add(&mut self, definition: &ChoreDefinition) -> TaskId {
        self.next_id += 1;
        let id = TaskId::new(self.next_id);

        self.by_item_key
            .entry(definition.item_key.clone())
            .or_insert(id);
        self.tasks.push(Task {
            id,
            name: definition.name.clone(),
            description: definition.description.clone(),
            state: TaskState::Pending,
            item_key: definition.item_key.clone(),
            target: definition.target,
            reveal_key: definition.reveal.as_ref().map(|reveal| reveal.key.clone()),
        });
        id
    }

    /// All chores in creation order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn summaries(&self) -> Vec<TaskSummary> {
        self.tasks.iter().map(Task::summary).collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Resolves a world interactable to its chore. Unmapped keys are normal.
    pub fn find_by_item_key(&self, key: &str) -> Option<&Task> {
        self.by_item_key.get(key).and_then(|id| self.get(*id))
    }

    pub fn active(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|task| task.state == TaskState::InProgress)
    }

    pub fn set_in_progress(
        &mut self,
        id: TaskId,
    ) -> Result<TaskStateChangedEvent, TaskTransitionError> {
        let state = self.state_of(id)?;
        if state != TaskState::Pending {
            return Err(TaskTransitionError::wrong_state(
                id,
                TaskState::Pending,
                state,
            ));
        }
        if let Some(active) = self.active() {
            return Err(TaskTransitionError::AnotherActive {
                requested: id,
                active: active.id,
            });
        }
        self.transition(id, TaskState::InProgress)
    }

    pub fn complete(&mut self, id: TaskId) -> Result<TaskStateChangedEvent, TaskTransitionError> {
        let state = self.state_of(id)?;
        if state != TaskState::InProgress {
            return Err(TaskTransitionError::wrong_state(
                id,
                TaskState::InProgress,
                state,
            ));
        }
        self.transition(id, TaskState::Complete)
    }

    /// Returns a stuck in-progress chore to Pending. Only the stuck-task
    /// timeout uses this; normal play never moves a chore backwards.
    pub fn abandon(&mut self, id: TaskId) -> Result<TaskStateChangedEvent, TaskTransitionError> {
        let state = self.state_of(id)?;
        if state != TaskState::InProgress {
            return Err(TaskTransitionError::wrong_state(
                id,
                TaskState::InProgress,
                state,
            ));
        }
        self.transition(id, TaskState::Pending)
    }

    pub fn all_complete(&self) -> bool {
        self.tasks.iter().all(Task::is_complete)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_complete()).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn state_of(&self, id: TaskId) -> Result<TaskState, TaskTransitionError> {
        self.get(id)
            .map(|task| task.state)
            .ok_or(TaskTransitionError::UnknownTask { id })
    }

    fn transition(
        &mut self,
        id: TaskId,
        to: TaskState,
    ) -> Result<TaskStateChangedEvent, TaskTransitionError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskTransitionError::UnknownTask { id })?;
        let from = task.state;
        task.state = to;
        debug!(target: "tasks", "{} '{}': {} -> {}", id, task.name, from, to);
        Ok(TaskStateChangedEvent {
            task: id,
            name: task.name.clone(),
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::data::ChoreDefinition;

    fn definition(name: &str, key: &str) -> ChoreDefinition {
        ChoreDefinition {
            name: name.to_string(),
            description: format!("{name} description"),
            item_key: key.to_string(),
            item_position: Vec2::ZERO,
            target: Vec2::new(10.0, 10.0),
            reveal: None,
        }
    }

    fn chips_and_boxes() -> (TaskRegistry, TaskId, TaskId) {
        let mut registry = TaskRegistry::default();
        let chips = registry.add(&definition("Chips", "chips"));
        let boxes = registry.add(&definition("Boxes", "boxes"));
        (registry, chips, boxes)
    }

    fn in_progress_count(registry: &TaskRegistry) -> usize {
        registry
            .list()
            .iter()
            .filter(|task| task.state == TaskState::InProgress)
            .count()
    }

    #[test]
    fn resolves_item_key_and_starts_task() {
        let (mut registry, chips, boxes) = chips_and_boxes();

        let task = registry.find_by_item_key("chips").expect("chips is mapped");
        assert_eq!(task.id, chips);

        let change = registry.set_in_progress(chips).expect("pending task starts");
        assert_eq!(change.from, TaskState::Pending);
        assert_eq!(change.to, TaskState::InProgress);
        assert_eq!(registry.get(chips).unwrap().state, TaskState::InProgress);
        assert_eq!(registry.get(boxes).unwrap().state, TaskState::Pending);
    }

    #[test]
    fn rejects_second_task_while_one_is_active() {
        let (mut registry, chips, boxes) = chips_and_boxes();
        registry.set_in_progress(chips).unwrap();

        let err = registry.set_in_progress(boxes).unwrap_err();
        assert_eq!(
            err,
            TaskTransitionError::AnotherActive {
                requested: boxes,
                active: chips,
            }
        );
        assert_eq!(registry.get(boxes).unwrap().state, TaskState::Pending);
        assert_eq!(in_progress_count(&registry), 1);
    }

    #[test]
    fn unmapped_key_finds_nothing() {
        let (registry, _, _) = chips_and_boxes();
        assert!(registry.find_by_item_key("stand").is_none());
    }

    #[test]
    fn complete_is_idempotent_and_terminal() {
        let (mut registry, chips, _) = chips_and_boxes();
        registry.set_in_progress(chips).unwrap();
        registry.complete(chips).unwrap();

        assert!(matches!(
            registry.complete(chips),
            Err(TaskTransitionError::WrongState { .. })
        ));
        assert!(registry.set_in_progress(chips).is_err());
        assert!(registry.abandon(chips).is_err());
        assert_eq!(registry.get(chips).unwrap().state, TaskState::Complete);
        assert_eq!(registry.completed_count(), 1);
    }

    #[test]
    fn complete_requires_in_progress() {
        let (mut registry, chips, _) = chips_and_boxes();
        assert!(registry.complete(chips).is_err());
        assert!(matches!(
            registry.complete(TaskId::new(99)),
            Err(TaskTransitionError::UnknownTask { .. })
        ));
        assert_eq!(registry.get(chips).unwrap().state, TaskState::Pending);
    }

    #[test]
    fn all_complete_is_monotonic() {
        let (mut registry, chips, boxes) = chips_and_boxes();
        assert!(!registry.all_complete());

        for id in [chips, boxes] {
            registry.set_in_progress(id).unwrap();
            registry.complete(id).unwrap();
        }
        assert!(registry.all_complete());

        // Every later operation is rejected, so the aggregate stays complete.
        let _ = registry.set_in_progress(chips);
        let _ = registry.abandon(boxes);
        let _ = registry.complete(boxes);
        assert!(registry.all_complete());
    }

    #[test]
    fn state_sequences_only_move_forward() {
        let (mut registry, chips, boxes) = chips_and_boxes();
        let mut history = vec![registry.get(chips).unwrap().state];

        let attempts: [fn(&mut TaskRegistry, TaskId) -> bool; 5] = [
            |r, id| r.complete(id).is_ok(),
            |r, id| r.set_in_progress(id).is_ok(),
            |r, id| r.set_in_progress(id).is_ok(),
            |r, id| r.complete(id).is_ok(),
            |r, id| r.set_in_progress(id).is_ok(),
        ];
        for attempt in attempts {
            if attempt(&mut registry, chips) {
                history.push(registry.get(chips).unwrap().state);
            }
            assert!(in_progress_count(&registry) <= 1);
        }

        assert_eq!(
            history,
            vec![TaskState::Pending, TaskState::InProgress, TaskState::Complete]
        );
        assert_eq!(registry.get(boxes).unwrap().state, TaskState::Pending);
    }

    #[test]
    fn abandon_frees_the_active_slot() {
        let (mut registry, chips, boxes) = chips_and_boxes();
        registry.set_in_progress(chips).unwrap();
        registry.abandon(chips).unwrap();

        assert!(registry.active().is_none());
        assert!(registry.set_in_progress(boxes).is_ok());
    }

    #[test]
    fn builds_from_catalog_in_order() {
        let catalog = ChoreCatalog::builtin();
        let registry = TaskRegistry::from_catalog(&catalog);

        assert_eq!(registry.len(), catalog.len());
        let names: Vec<_> = registry.summaries().into_iter().map(|s| s.name).collect();
        let expected: Vec<_> = catalog.chores().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, expected);
        assert_eq!(
            registry.find_by_item_key("bedMessy").and_then(|t| t.reveal_key.clone()),
            Some("bedNeat".to_string())
        );
    }
}
