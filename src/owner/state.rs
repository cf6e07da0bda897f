//! Owner behaviour state machine.
use bevy::prelude::*;
use serde::Serialize;

use crate::tasks::types::TaskId;

use super::{
    errors::OwnerTransitionError,
    events::{ActionHandle, OwnerStateChangedEvent},
};

/// What the owner is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerState {
    #[default]
    Idle,
    Walking,
    Cleaning,
    Distracted,
}

impl OwnerState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Cleaning => "cleaning",
            Self::Distracted => "distracted",
        }
    }

    /// Walking or cleaning: new chores cannot be triggered.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Walking | Self::Cleaning)
    }
}

/// Everything a distraction needs to park and later restore the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkedActivity {
    pub prior: OwnerState,
    pub task: Option<TaskId>,
    pub in_flight: Option<ActionHandle>,
    pub change: OwnerStateChangedEvent,
}

/// The owner actor. Only the coordinators mutate it, through the transition
/// methods below; each successful transition returns the event to broadcast.
#[derive(Resource, Debug)]
pub struct OwnerBehavior {
    position: Vec2,
    state: OwnerState,
    current_task: Option<TaskId>,
    in_flight: Option<ActionHandle>,
    next_handle: u64,
}

impl OwnerBehavior {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            state: OwnerState::Idle,
            current_task: None,
            in_flight: None,
            next_handle: 0,
        }
    }

    pub fn state(&self) -> OwnerState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// The chore being serviced. Always an in-progress chore, or none.
    pub fn current_task(&self) -> Option<TaskId> {
        self.current_task
    }

    pub fn in_flight(&self) -> Option<ActionHandle> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_distracted(&self) -> bool {
        self.state == OwnerState::Distracted
    }

    /// Idle/Cleaning -> Walking toward `task`. Returns the handle for the move.
    pub fn start_walking(
        &mut self,
        task: TaskId,
    ) -> Result<(ActionHandle, OwnerStateChangedEvent), OwnerTransitionError> {
        if !matches!(self.state, OwnerState::Idle | OwnerState::Cleaning) {
            return Err(OwnerTransitionError::new(self.state, OwnerState::Walking));
        }
        self.current_task = Some(task);
        let handle = self.issue_handle();
        let change = self.set_state(OwnerState::Walking);
        Ok((handle, change))
    }

    /// Walking -> Cleaning. Returns the handle for the timed effect.
    pub fn arrive(
        &mut self,
    ) -> Result<(ActionHandle, OwnerStateChangedEvent), OwnerTransitionError> {
        if self.state != OwnerState::Walking {
            return Err(OwnerTransitionError::new(self.state, OwnerState::Cleaning));
        }
        let handle = self.issue_handle();
        let change = self.set_state(OwnerState::Cleaning);
        Ok((handle, change))
    }

    /// Cleaning -> Idle, releasing the serviced chore.
    pub fn finish_cleaning(
        &mut self,
    ) -> Result<(Option<TaskId>, OwnerStateChangedEvent), OwnerTransitionError> {
        if self.state != OwnerState::Cleaning {
            return Err(OwnerTransitionError::new(self.state, OwnerState::Idle));
        }
        let change = self.set_state(OwnerState::Idle);
        let task = self.current_task.take();
        self.in_flight = None;
        Ok((task, change))
    }

    /// Idle/Walking/Cleaning -> Distracted. The chore and in-flight command
    /// stay attached so they can resume.
    pub fn distract(&mut self) -> Result<ParkedActivity, OwnerTransitionError> {
        if self.state == OwnerState::Distracted {
            return Err(OwnerTransitionError::new(self.state, OwnerState::Distracted));
        }
        let prior = self.state;
        let change = self.set_state(OwnerState::Distracted);
        Ok(ParkedActivity {
            prior,
            task: self.current_task,
            in_flight: self.in_flight,
            change,
        })
    }

    /// Distracted -> the state recorded when the distraction began.
    pub fn refocus(
        &mut self,
        prior: OwnerState,
    ) -> Result<OwnerStateChangedEvent, OwnerTransitionError> {
        if self.state != OwnerState::Distracted || prior == OwnerState::Distracted {
            return Err(OwnerTransitionError::new(self.state, prior));
        }
        Ok(self.set_state(prior))
    }

    /// Walking/Cleaning -> Idle without completing. Returns the handle to cancel.
    pub fn abandon(
        &mut self,
    ) -> Result<(Option<ActionHandle>, OwnerStateChangedEvent), OwnerTransitionError> {
        if !self.state.is_busy() {
            return Err(OwnerTransitionError::new(self.state, OwnerState::Idle));
        }
        let change = self.set_state(OwnerState::Idle);
        self.current_task = None;
        Ok((self.in_flight.take(), change))
    }

    fn issue_handle(&mut self) -> ActionHandle {
        self.next_handle += 1;
        let handle = ActionHandle::new(self.next_handle);
        self.in_flight = Some(handle);
        handle
    }

    fn set_state(&mut self, to: OwnerState) -> OwnerStateChangedEvent {
        let from = self.state;
        self.state = to;
        debug!(target: "owner", "Owner {} -> {}", from.label(), to.label());
        OwnerStateChangedEvent {
            from,
            to,
            task: self.current_task,
        }
    }
}

impl Default for OwnerBehavior {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_cleans_and_returns_to_idle() {
        let mut owner = OwnerBehavior::default();
        let task = TaskId::new(1);

        let (walk, change) = owner.start_walking(task).expect("idle owner can walk");
        assert_eq!(change.from, OwnerState::Idle);
        assert_eq!(change.to, OwnerState::Walking);
        assert_eq!(owner.in_flight(), Some(walk));
        assert_eq!(owner.current_task(), Some(task));

        let (clean, _) = owner.arrive().expect("walking owner can arrive");
        assert_ne!(clean, walk);
        assert_eq!(owner.state(), OwnerState::Cleaning);

        let (finished, change) = owner.finish_cleaning().expect("cleaning owner finishes");
        assert_eq!(finished, Some(task));
        assert_eq!(change.to, OwnerState::Idle);
        assert!(owner.current_task().is_none());
        assert!(owner.in_flight().is_none());
    }

    #[test]
    fn rejects_out_of_order_transitions() {
        let mut owner = OwnerBehavior::default();
        assert_eq!(
            owner.arrive().unwrap_err(),
            OwnerTransitionError::new(OwnerState::Idle, OwnerState::Cleaning)
        );
        assert!(owner.finish_cleaning().is_err());
        assert!(owner.refocus(OwnerState::Idle).is_err());
        assert!(owner.abandon().is_err());

        owner.start_walking(TaskId::new(1)).unwrap();
        assert!(owner.start_walking(TaskId::new(2)).is_err());
        assert_eq!(owner.current_task(), Some(TaskId::new(1)));
    }

    #[test]
    fn distraction_parks_and_restores_activity() {
        let mut owner = OwnerBehavior::default();
        let (walk, _) = owner.start_walking(TaskId::new(3)).unwrap();

        let parked = owner.distract().expect("walking owner can be distracted");
        assert_eq!(parked.prior, OwnerState::Walking);
        assert_eq!(parked.task, Some(TaskId::new(3)));
        assert_eq!(parked.in_flight, Some(walk));
        assert!(owner.is_distracted());
        assert!(!owner.is_busy());
        assert!(owner.distract().is_err());

        let change = owner.refocus(parked.prior).unwrap();
        assert_eq!(change.to, OwnerState::Walking);
        assert_eq!(owner.in_flight(), Some(walk));
        assert_eq!(owner.current_task(), Some(TaskId::new(3)));
    }

    #[test]
    fn refocus_cannot_target_distracted() {
        let mut owner = OwnerBehavior::default();
        owner.distract().unwrap();
        assert!(owner.refocus(OwnerState::Distracted).is_err());
        assert!(owner.refocus(OwnerState::Idle).is_ok());
    }

    #[test]
    fn abandon_releases_task_and_handle() {
        let mut owner = OwnerBehavior::default();
        let (walk, _) = owner.start_walking(TaskId::new(1)).unwrap();

        let (cancelled, change) = owner.abandon().unwrap();
        assert_eq!(cancelled, Some(walk));
        assert_eq!(change.to, OwnerState::Idle);
        assert!(owner.current_task().is_none());
    }
}
