use bevy::prelude::*;

use crate::{
    core::{
        context::{EngineContext, Outbox, OutboxWriters},
        plugin::SimulationClock,
    },
    owner::state::OwnerBehavior,
    tasks::registry::TaskRegistry,
};

use super::{coordinator::DistractionCoordinator, events::DistractionRequest};

pub fn handle_distraction_requests(
    mut requests: MessageReader<DistractionRequest>,
    mut distraction: ResMut<DistractionCoordinator>,
    mut tasks: ResMut<TaskRegistry>,
    mut owner: ResMut<OwnerBehavior>,
    mut writers: OutboxWriters,
) {
    if requests.is_empty() {
        return;
    }
    let mut outbox = Outbox::default();
    {
        let mut ctx = EngineContext::new(&mut tasks, &mut owner, &mut outbox);
        for _ in requests.read() {
            if let Err(err) = distraction.trigger(&mut ctx) {
                debug!(target: "distraction", "Distraction request ignored: {}", err);
            }
        }
    }
    outbox.flush(&mut writers);
}

pub fn tick_distraction(
    clock: Res<SimulationClock>,
    mut distraction: ResMut<DistractionCoordinator>,
    mut tasks: ResMut<TaskRegistry>,
    mut owner: ResMut<OwnerBehavior>,
    mut writers: OutboxWriters,
) {
    let mut outbox = Outbox::default();
    {
        let mut ctx = EngineContext::new(&mut tasks, &mut owner, &mut outbox);
        distraction.tick(clock.last_scaled_delta(), &mut ctx);
    }
    if !outbox.is_empty() {
        outbox.flush(&mut writers);
    }
}
