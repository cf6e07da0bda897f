// src/ui/plugin.rs
//
// UiPlugin coordinates the taskboard, speech bubbles and full-screen overlays.

use bevy::prelude::*;

use crate::core::plugin::{ChoreSet, GamePhase};

use super::{
    overlays::{advance_intro, despawn_intro_overlay, show_ending_overlay, spawn_intro_overlay},
    speech_bubble::SpeechBubblePlugin,
    taskboard::{close_taskboard, refresh_taskboard, toggle_taskboard, TaskboardState},
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.add_plugins(SpeechBubblePlugin)
            .init_resource::<TaskboardState>()
            .add_systems(OnEnter(GamePhase::Intro), spawn_intro_overlay)
            .add_systems(OnExit(GamePhase::Intro), despawn_intro_overlay)
            .add_systems(OnEnter(GamePhase::Ending), close_taskboard)
            .add_systems(
                Update,
                advance_intro
                    .in_set(ChoreSet::Input)
                    .run_if(in_state(GamePhase::Intro)),
            )
            .add_systems(
                Update,
                toggle_taskboard
                    .in_set(ChoreSet::Input)
                    .run_if(in_state(GamePhase::Playing)),
            )
            .add_systems(
                Update,
                (refresh_taskboard, show_ending_overlay).in_set(ChoreSet::Present),
            );
    }
}
