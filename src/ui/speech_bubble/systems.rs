// src/ui/speech_bubble/systems.rs
//
// Systems for spawning, updating, and despawning speech bubbles.

use bevy::prelude::*;

use crate::{
    core::context::{Notice, Speaker},
    house::components::{OwnerAvatar, Player},
};

use super::components::{SpeechBubble, SpeechBubbleSettings, SpeechBubbleTracker};

const TEXT_COLOR: Color = Color::srgb(0.1, 0.1, 0.12);
const OWNER_TEXT_COLOR: Color = Color::srgb(0.3, 0.15, 0.4);
const BUBBLE_Z: f32 = 20.0;

fn text_color(speaker: Speaker) -> Color {
    match speaker {
        Speaker::Player => TEXT_COLOR,
        Speaker::Owner => OWNER_TEXT_COLOR,
    }
}

/// Spawn or refresh a bubble for every notice.
pub fn spawn_speech_bubbles(
    mut commands: Commands,
    mut tracker: ResMut<SpeechBubbleTracker>,
    settings: Res<SpeechBubbleSettings>,
    mut notices: MessageReader<Notice>,
) {
    for notice in notices.read() {
        if notice.text.is_empty() {
            continue;
        }
        debug!("Speech bubble for {:?}: \"{}\"", notice.speaker, notice.text);

        // Reuse the speaker's bubble, resetting its timer.
        if let Some(&bubble_entity) = tracker.by_speaker.get(&notice.speaker) {
            commands.entity(bubble_entity).insert((
                SpeechBubble::new(notice.speaker, settings.lifetime_seconds),
                Text2d::new(notice.text.clone()),
                TextColor(text_color(notice.speaker)),
            ));
            continue;
        }

        let bubble_entity = commands
            .spawn((
                Text2d::new(notice.text.clone()),
                TextFont {
                    font_size: settings.font_size,
                    ..default()
                },
                TextColor(text_color(notice.speaker)),
                Transform::from_xyz(0.0, 0.0, BUBBLE_Z),
                Visibility::Hidden,
                SpeechBubble::new(notice.speaker, settings.lifetime_seconds),
                Name::new(format!("Speech Bubble ({:?})", notice.speaker)),
            ))
            .id();

        tracker.by_speaker.insert(notice.speaker, bubble_entity);
    }
}

/// Keep bubbles above their speaker, fade them, and despawn expired ones.
pub fn update_speech_bubbles(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<SpeechBubbleSettings>,
    mut tracker: ResMut<SpeechBubbleTracker>,
    player: Query<&Transform, (With<Player>, Without<SpeechBubble>)>,
    owner: Query<&Transform, (With<OwnerAvatar>, Without<SpeechBubble>)>,
    mut bubbles: Query<(
        Entity,
        &mut SpeechBubble,
        &mut Transform,
        &mut Visibility,
        &mut TextColor,
    )>,
) {
    for (entity, mut bubble, mut transform, mut visibility, mut color) in bubbles.iter_mut() {
        bubble.tick(time.delta());

        if bubble.is_finished() {
            tracker.by_speaker.remove(&bubble.speaker());
            commands.entity(entity).despawn();
            continue;
        }

        let anchor = match bubble.speaker() {
            Speaker::Player => player.single(),
            Speaker::Owner => owner.single(),
        };
        let Ok(anchor) = anchor else {
            tracker.by_speaker.remove(&bubble.speaker());
            commands.entity(entity).despawn();
            continue;
        };

        transform.translation.x = anchor.translation.x;
        transform.translation.y = anchor.translation.y + settings.vertical_offset;
        *visibility = Visibility::Visible;

        let alpha = bubble.fade_alpha(settings.fade_seconds);
        color.0 = text_color(bubble.speaker()).with_alpha(alpha);
    }
}
