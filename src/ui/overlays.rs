// src/ui/overlays.rs
//
// Full-screen intro and ending cards.

use bevy::prelude::*;

use crate::{core::plugin::GamePhase, ending::observer::EndingReachedEvent};

const OVERLAY_COLOR: Color = Color::BLACK;
const NARRATIVE_COLOR: Color = Color::WHITE;
const HINT_COLOR: Color = Color::srgb(0.53, 0.53, 0.53);

const INTRO_LINES: [&str; 16] = [
    "The owner has been living with a mental disorder",
    "that affects motivation, concentration,",
    "and emotional stability.",
    "",
    "The cat was his emotional anchor.",
    "",
    "The sudden death of the cat",
    "worsened his condition.",
    "",
    "The house fell into disarray:",
    "dirty dishes, messy clothes, unwashed spaces.",
    "",
    "In his grief, he stopped functioning.",
    "",
    "The cat's spirit returns",
    "to help him regain stability and hope.",
];

#[derive(Component, Debug)]
pub struct IntroOverlay;

#[derive(Component, Debug)]
pub struct EndingOverlay;

pub fn spawn_intro_overlay(mut commands: Commands) {
    let narrative = INTRO_LINES.join("\n");
    spawn_card(
        &mut commands,
        IntroOverlay,
        "Intro Overlay",
        &narrative,
        "Press SPACE to continue",
    );
}

pub fn advance_intro(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        next_phase.set(GamePhase::Playing);
    }
}

pub fn despawn_intro_overlay(mut commands: Commands, overlays: Query<Entity, With<IntroOverlay>>) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn show_ending_overlay(
    mut commands: Commands,
    mut endings: MessageReader<EndingReachedEvent>,
    existing: Query<(), With<EndingOverlay>>,
) {
    let Some(ending) = endings.read().last() else {
        return;
    };
    if !existing.is_empty() {
        return;
    }
    let body = format!(
        "All {} chores are done.\n\nThe house feels like a home again,\nand so does he.",
        ending.completed
    );
    spawn_card(&mut commands, EndingOverlay, "Ending Overlay", &body, "Thank you for playing");
}

fn spawn_card(
    commands: &mut Commands,
    marker: impl Component,
    name: &'static str,
    body: &str,
    hint: &str,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(40.0),
                ..default()
            },
            BackgroundColor(OVERLAY_COLOR),
            ZIndex(200),
            marker,
            Name::new(name),
        ))
        .with_children(|card| {
            card.spawn((
                Text::new(body),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(NARRATIVE_COLOR),
            ));
            card.spawn((
                Text::new(hint),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(HINT_COLOR),
            ));
        });
}
