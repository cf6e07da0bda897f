//! Interaction plugin: turns interaction presses into chore triggers.
use bevy::prelude::*;

use crate::core::plugin::{ChoreSet, GamePhase};

use super::{
    config::InteractionSettings,
    coordinator::InteractionCoordinator,
    systems::{handle_action_finished, handle_interaction_requests, tick_interaction_timeout},
    types::InteractionRequest,
};

/// Interaction steps inside `ChoreSet::Coordinate`. Distraction runs after these.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionSystems;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::load_or_default();
        info!(
            target: "interaction",
            "Interaction radius {:.0}, cleaning {:.1}s, timeout {}",
            settings.radius,
            settings.cleaning_duration.as_secs_f32(),
            settings
                .action_timeout
                .map(|timeout| format!("{:.0}s", timeout.as_secs_f32()))
                .unwrap_or_else(|| "off".to_string())
        );

        app.insert_resource(InteractionCoordinator::new(settings))
            .add_message::<InteractionRequest>()
            .configure_sets(
                Update,
                InteractionSystems
                    .in_set(ChoreSet::Coordinate)
                    .run_if(in_state(GamePhase::Playing)),
            )
            .add_systems(
                Update,
                (
                    handle_action_finished,
                    handle_interaction_requests,
                    tick_interaction_timeout,
                )
                    .chain()
                    .in_set(InteractionSystems),
            );
    }
}
