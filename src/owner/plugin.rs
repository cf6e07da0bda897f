//! Owner plugin registering the behaviour resource and its command channel.
use bevy::prelude::*;

use super::{
    events::{OwnerActionFinished, OwnerCommand, OwnerStateChangedEvent},
    state::OwnerBehavior,
};

/// The owner starts in the bedroom, next to the bed.
pub const OWNER_START_POSITION: Vec2 = Vec2::new(-420.0, 285.0);

pub struct OwnerPlugin;

impl Plugin for OwnerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OwnerBehavior::new(OWNER_START_POSITION))
            .add_message::<OwnerCommand>()
            .add_message::<OwnerActionFinished>()
            .add_message::<OwnerStateChangedEvent>()
            .add_systems(Update, log_owner_transitions);
    }
}

fn log_owner_transitions(mut changes: MessageReader<OwnerStateChangedEvent>) {
    for change in changes.read() {
        match change.task {
            Some(task) => info!(
                target: "owner",
                "Owner {} -> {} ({})",
                change.from.label(),
                change.to.label(),
                task
            ),
            None => info!(
                target: "owner",
                "Owner {} -> {}",
                change.from.label(),
                change.to.label()
            ),
        }
    }
}
