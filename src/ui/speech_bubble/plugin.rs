// src/ui/speech_bubble/plugin.rs
//
// Plugin registration for speech bubble systems.

use bevy::prelude::*;

use crate::core::plugin::ChoreSet;

use super::components::{SpeechBubbleSettings, SpeechBubbleTracker};
use super::systems::{spawn_speech_bubbles, update_speech_bubbles};

/// Shows `Notice`s as text bubbles above the cat and the owner.
///
/// Requires `HousePlugin` for the speaker entities.
pub struct SpeechBubblePlugin;

impl Plugin for SpeechBubblePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpeechBubbleSettings>()
            .init_resource::<SpeechBubbleTracker>()
            .add_systems(
                Update,
                (spawn_speech_bubbles, update_speech_bubbles)
                    .chain()
                    .in_set(ChoreSet::Present),
            );
    }
}
