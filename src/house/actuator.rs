//! Executes owner commands: linear walks and the bobbing cleaning effect.
use std::{f32::consts::TAU, time::Duration};

use bevy::prelude::*;

use crate::owner::events::{ActionHandle, OwnerCommand};

const BOB_PERIOD_SECONDS: f32 = 0.6;
const BOB_HEIGHT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActuatorJob {
    Walk {
        handle: ActionHandle,
        target: Vec2,
    },
    Effect {
        handle: ActionHandle,
        remaining: Duration,
        elapsed: Duration,
    },
}

impl ActuatorJob {
    fn handle(&self) -> ActionHandle {
        match self {
            Self::Walk { handle, .. } | Self::Effect { handle, .. } => *handle,
        }
    }
}

/// Runs at most one owner command at a time. Suspended jobs keep their
/// remaining distance and duration.
#[derive(Resource, Debug)]
pub struct OwnerActuator {
    walk_speed: f32,
    job: Option<ActuatorJob>,
    suspended: bool,
}

impl OwnerActuator {
    pub fn new(walk_speed: f32) -> Self {
        Self {
            walk_speed,
            job: None,
            suspended: false,
        }
    }

    pub fn current_handle(&self) -> Option<ActionHandle> {
        self.job.as_ref().map(ActuatorJob::handle)
    }

    pub fn apply(&mut self, command: &OwnerCommand) {
        let targets_current = self.current_handle() == Some(command.handle());
        match *command {
            OwnerCommand::MoveTo { handle, target } => {
                self.job = Some(ActuatorJob::Walk { handle, target });
                self.suspended = false;
            }
            OwnerCommand::PlayTimedEffect { handle, duration } => {
                self.job = Some(ActuatorJob::Effect {
                    handle,
                    remaining: duration,
                    elapsed: Duration::ZERO,
                });
                self.suspended = false;
            }
            OwnerCommand::Suspend { .. } if targets_current => {
                self.suspended = true;
            }
            OwnerCommand::Resume { .. } if targets_current => {
                self.suspended = false;
            }
            OwnerCommand::Cancel { .. } if targets_current => {
                self.job = None;
                self.suspended = false;
            }
            _ => debug!(
                target: "owner",
                "Actuator ignoring {:?} for a job it is not running",
                command
            ),
        }
    }

    /// Moves the job forward, updating `position` for walks. Returns the
    /// handle of a job that finished during this step.
    pub fn advance(&mut self, position: &mut Vec2, delta: Duration) -> Option<ActionHandle> {
        if self.suspended {
            return None;
        }
        match self.job? {
            ActuatorJob::Walk { handle, target } => {
                let step = self.walk_speed * delta.as_secs_f32();
                let offset = target - *position;
                let distance = offset.length();
                if distance <= step {
                    *position = target;
                    self.job = None;
                    Some(handle)
                } else {
                    *position += offset / distance * step;
                    None
                }
            }
            ActuatorJob::Effect {
                handle,
                remaining,
                elapsed,
            } => {
                if delta >= remaining {
                    self.job = None;
                    Some(handle)
                } else {
                    self.job = Some(ActuatorJob::Effect {
                        handle,
                        remaining: remaining - delta,
                        elapsed: elapsed + delta,
                    });
                    None
                }
            }
        }
    }

    /// Vertical offset for the cleaning bob; zero unless an effect is playing.
    pub fn bob_offset(&self) -> f32 {
        match self.job {
            Some(ActuatorJob::Effect { elapsed, .. }) => {
                let phase = elapsed.as_secs_f32() / BOB_PERIOD_SECONDS * TAU;
                phase.sin().abs() * BOB_HEIGHT
            }
            _ => 0.0,
        }
    }
}
