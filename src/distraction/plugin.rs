//! Distraction plugin: periodic and requested interruptions of the owner.
use bevy::prelude::*;

use crate::{
    core::plugin::{ChoreSet, GamePhase},
    interaction::plugin::InteractionSystems,
};

use super::{
    config::DistractionSettings,
    coordinator::DistractionCoordinator,
    events::{DistractionEvent, DistractionRequest},
    systems::{handle_distraction_requests, tick_distraction},
};

pub struct DistractionPlugin;

impl Plugin for DistractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = DistractionSettings::load_or_default();
        if settings.enabled {
            info!(
                target: "distraction",
                "Periodic distractions every {:.0}s",
                settings.interval.as_secs_f32()
            );
        } else {
            info!(target: "distraction", "Periodic distractions disabled");
        }

        app.insert_resource(DistractionCoordinator::new(settings))
            .add_message::<DistractionEvent>()
            .add_message::<DistractionRequest>()
            .add_systems(
                Update,
                (handle_distraction_requests, tick_distraction)
                    .chain()
                    .in_set(ChoreSet::Coordinate)
                    .after(InteractionSystems)
                    .run_if(in_state(GamePhase::Playing)),
            );
    }
}
