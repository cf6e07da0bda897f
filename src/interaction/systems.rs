use bevy::prelude::*;

use crate::{
    core::{
        context::{EngineContext, Outbox, OutboxWriters},
        plugin::SimulationClock,
    },
    distraction::coordinator::DistractionCoordinator,
    house::components::Interactable,
    owner::{events::OwnerActionFinished, state::OwnerBehavior},
    tasks::registry::TaskRegistry,
};

use super::{
    coordinator::InteractionCoordinator,
    types::{InteractableProbe, InteractionOutcome, InteractionRequest},
};

/// Feeds actuator completions back into the walk -> clean -> complete flow.
pub fn handle_action_finished(
    mut finished: MessageReader<OwnerActionFinished>,
    mut coordinator: ResMut<InteractionCoordinator>,
    mut tasks: ResMut<TaskRegistry>,
    mut owner: ResMut<OwnerBehavior>,
    mut writers: OutboxWriters,
) {
    let mut outbox = Outbox::default();
    {
        let mut ctx = EngineContext::new(&mut tasks, &mut owner, &mut outbox);
        for event in finished.read() {
            coordinator.on_action_finished(event.handle, &mut ctx);
        }
    }
    outbox.flush(&mut writers);
}

pub fn handle_interaction_requests(
    mut requests: MessageReader<InteractionRequest>,
    interactables: Query<(&Interactable, &Transform, &Visibility)>,
    mut coordinator: ResMut<InteractionCoordinator>,
    mut distraction: ResMut<DistractionCoordinator>,
    mut tasks: ResMut<TaskRegistry>,
    mut owner: ResMut<OwnerBehavior>,
    mut writers: OutboxWriters,
) {
    if requests.is_empty() {
        return;
    }

    let probes: Vec<InteractableProbe> = interactables
        .iter()
        .map(|(interactable, transform, visibility)| {
            InteractableProbe::new(
                interactable.key.clone(),
                transform.translation.truncate(),
                *visibility != Visibility::Hidden,
            )
        })
        .collect();

    let mut outbox = Outbox::default();
    {
        let mut ctx = EngineContext::new(&mut tasks, &mut owner, &mut outbox);
        for request in requests.read() {
            let outcome = coordinator.check_interaction(
                request.actor_position,
                &probes,
                &mut distraction,
                &mut ctx,
            );
            if outcome == InteractionOutcome::NothingInRange {
                debug!(
                    target: "interaction",
                    "Nothing to interact with near ({:.0}, {:.0})",
                    request.actor_position.x,
                    request.actor_position.y
                );
            }
        }
    }
    outbox.flush(&mut writers);
}

pub fn tick_interaction_timeout(
    clock: Res<SimulationClock>,
    mut coordinator: ResMut<InteractionCoordinator>,
    mut tasks: ResMut<TaskRegistry>,
    mut owner: ResMut<OwnerBehavior>,
    mut writers: OutboxWriters,
) {
    let mut outbox = Outbox::default();
    {
        let mut ctx = EngineContext::new(&mut tasks, &mut owner, &mut outbox);
        coordinator.tick(clock.last_scaled_delta(), &mut ctx);
    }
    if !outbox.is_empty() {
        outbox.flush(&mut writers);
    }
}
