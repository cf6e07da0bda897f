//! Distraction coordinator: parks the owner mid-activity and resumes it on refocus.
use std::time::Duration;

use bevy::prelude::*;

use crate::{
    core::context::{EngineContext, Notice},
    owner::{
        events::{ActionHandle, OwnerCommand},
        state::OwnerState,
    },
    tasks::types::TaskId,
};

use super::{config::DistractionSettings, errors::DistractionError, events::DistractionEvent};

/// What the owner was doing when the distraction began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistractionSession {
    pub prior: OwnerState,
    pub task: Option<TaskId>,
    /// Command frozen by the actuator until refocus.
    pub suspended: Option<ActionHandle>,
}

#[derive(Resource, Debug)]
pub struct DistractionCoordinator {
    settings: DistractionSettings,
    session: Option<DistractionSession>,
    since_last: Duration,
}

impl DistractionCoordinator {
    pub fn new(settings: DistractionSettings) -> Self {
        Self {
            settings,
            session: None,
            since_last: Duration::ZERO,
        }
    }

    pub fn is_distracted(&self) -> bool {
        self.session.is_some()
    }

    /// Interrupts the owner, parking any chore and freezing the in-flight command.
    pub fn trigger(&mut self, ctx: &mut EngineContext) -> Result<(), DistractionError> {
        if self.session.is_some() {
            return Err(DistractionError::AlreadyDistracted);
        }
        let parked = ctx.owner.distract()?;

        let suspended = parked.in_flight.filter(|_| parked.prior.is_busy());
        if let Some(handle) = suspended {
            ctx.outbox.commands.push(OwnerCommand::Suspend { handle });
        }

        info!(
            target: "distraction",
            "Owner distracted while {}{}",
            parked.prior.label(),
            parked
                .task
                .map(|task| format!(" ({} parked)", task))
                .unwrap_or_default()
        );

        ctx.outbox.owner_changes.push(parked.change);
        ctx.outbox.distractions.push(DistractionEvent::Started {
            prior: parked.prior,
            task: parked.task,
        });
        if !self.settings.distracted_line.is_empty() {
            ctx.outbox
                .notices
                .push(Notice::owner_line(self.settings.distracted_line.clone()));
        }

        self.session = Some(DistractionSession {
            prior: parked.prior,
            task: parked.task,
            suspended,
        });
        self.since_last = Duration::ZERO;
        Ok(())
    }

    /// Ends the session, restoring the prior state. The parked chore carries on
    /// from where it stopped. Returns that chore, if any.
    pub fn refocus(&mut self, ctx: &mut EngineContext) -> Result<Option<TaskId>, DistractionError> {
        let session = self.session.ok_or(DistractionError::NotDistracted)?;
        let change = ctx.owner.refocus(session.prior)?;
        self.session = None;
        self.since_last = Duration::ZERO;

        if let Some(handle) = session.suspended {
            ctx.outbox.commands.push(OwnerCommand::Resume { handle });
        }

        info!(
            target: "distraction",
            "Owner refocused, back to {}",
            session.prior.label()
        );

        ctx.outbox.owner_changes.push(change);
        ctx.outbox.distractions.push(DistractionEvent::Refocused {
            resumed: session.prior,
            task: session.task,
        });
        if !self.settings.refocused_line.is_empty() {
            ctx.outbox
                .notices
                .push(Notice::owner_line(self.settings.refocused_line.clone()));
        }
        Ok(session.task)
    }

    /// Accrues time toward the next periodic distraction.
    pub fn tick(&mut self, delta: Duration, ctx: &mut EngineContext) {
        if !self.settings.enabled || self.session.is_some() {
            return;
        }
        self.since_last = (self.since_last + delta).min(self.settings.interval);
        if self.since_last < self.settings.interval {
            return;
        }
        if let Err(err) = self.trigger(ctx) {
            debug!(target: "distraction", "Periodic distraction skipped: {}", err);
        }
    }
}

impl Default for DistractionCoordinator {
    fn default() -> Self {
        Self::new(DistractionSettings::default())
    }
}
