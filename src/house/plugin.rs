//! HousePlugin spawns the scene and drives the cat and the owner's avatar.
use bevy::prelude::*;

use crate::core::plugin::{ChoreSet, GamePhase};

use super::{
    actuator::OwnerActuator,
    components::PlayerMovementLock,
    layout::OWNER_WALK_SPEED,
    systems::{
        apply_chore_visibility, emit_interaction_requests, move_player, run_owner_actuator,
        spawn_house,
    },
};

pub struct HousePlugin;

impl Plugin for HousePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerMovementLock>()
            .insert_resource(OwnerActuator::new(OWNER_WALK_SPEED))
            .add_systems(Startup, spawn_house)
            .add_systems(
                Update,
                (move_player, emit_interaction_requests)
                    .in_set(ChoreSet::Input)
                    .run_if(in_state(GamePhase::Playing)),
            )
            .add_systems(Update, run_owner_actuator.in_set(ChoreSet::Actuate))
            .add_systems(Update, apply_chore_visibility.in_set(ChoreSet::Present));

        #[cfg(feature = "core_debug")]
        {
            app.add_systems(
                Update,
                super::systems::emit_debug_distraction
                    .in_set(ChoreSet::Input)
                    .run_if(in_state(GamePhase::Playing)),
            );
        }
    }
}
