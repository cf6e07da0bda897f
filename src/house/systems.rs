//! Systems for the house scene: spawning, cat input, and the owner's avatar.
use bevy::prelude::*;

use crate::{
    core::plugin::SimulationClock,
    interaction::types::InteractionRequest,
    owner::{
        events::{OwnerActionFinished, OwnerCommand},
        state::OwnerBehavior,
    },
    tasks::{data::ChoreCatalog, events::TaskStateChangedEvent, registry::TaskRegistry},
};

use super::{
    actuator::OwnerActuator,
    components::{Fridge, Interactable, OwnerAvatar, Player, PlayerMovementLock},
    layout::{
        ACTOR_SIZE, DIRT_Z, FLOOR_SIZE, FRIDGE_POSITION, ITEM_SIZE, ITEM_Z, OWNER_Z, PLAYER_START,
        PLAYER_SPEED, PLAYER_Z,
    },
};

const FLOOR_COLOR: Color = Color::srgb(0.82, 0.76, 0.66);
const PLAYER_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);
const OWNER_COLOR: Color = Color::srgb(0.55, 0.42, 0.62);
const ITEM_COLOR: Color = Color::srgb(0.72, 0.45, 0.25);
const DIRT_COLOR: Color = Color::srgba(0.35, 0.28, 0.18, 0.8);
const REVEAL_COLOR: Color = Color::srgb(0.45, 0.65, 0.85);
const FRIDGE_COLOR: Color = Color::srgb(0.9, 0.93, 0.95);

/// Spawns the camera, floor, actors, chore items and the fridge.
pub fn spawn_house(mut commands: Commands, catalog: Res<ChoreCatalog>, owner: Res<OwnerBehavior>) {
    commands.spawn((Camera2d, Name::new("House Camera")));

    commands.spawn((
        Sprite::from_color(FLOOR_COLOR, FLOOR_SIZE),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Name::new("Floor"),
    ));

    commands.spawn((
        Sprite::from_color(FRIDGE_COLOR, Vec2::new(50.0, 80.0)),
        Transform::from_translation(FRIDGE_POSITION.extend(ITEM_Z)),
        Fridge,
        Name::new("Fridge"),
    ));

    for chore in catalog.chores() {
        // Dirt overlays sit under props.
        let is_dirt = chore.item_key.to_ascii_lowercase().contains("dirt");
        let (color, z) = if is_dirt {
            (DIRT_COLOR, DIRT_Z)
        } else {
            (ITEM_COLOR, ITEM_Z)
        };
        commands.spawn((
            Sprite::from_color(color, ITEM_SIZE),
            Transform::from_translation(chore.item_position.extend(z)),
            Visibility::Visible,
            Interactable::new(chore.item_key.clone()),
            Name::new(format!("Item: {}", chore.item_key)),
        ));

        if let Some(reveal) = &chore.reveal {
            commands.spawn((
                Sprite::from_color(REVEAL_COLOR, ITEM_SIZE),
                Transform::from_translation(reveal.position.extend(ITEM_Z)),
                Visibility::Hidden,
                Interactable::new(reveal.key.clone()),
                Name::new(format!("Item: {}", reveal.key)),
            ));
        }
    }

    commands.spawn((
        Sprite::from_color(OWNER_COLOR, ACTOR_SIZE),
        Transform::from_translation(owner.position().extend(OWNER_Z)),
        OwnerAvatar,
        Name::new("Owner"),
    ));

    commands.spawn((
        Sprite::from_color(PLAYER_COLOR, ACTOR_SIZE),
        Transform::from_translation(PLAYER_START.extend(PLAYER_Z)),
        Player,
        Name::new("Cat"),
    ));

    info!("House spawned with {} chore items", catalog.len());
}

/// Moves the cat with WASD or the arrow keys.
pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    lock: Res<PlayerMovementLock>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    if !lock.can_move() {
        return;
    }
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    let direction = movement_direction(&keyboard);
    if direction == Vec2::ZERO {
        return;
    }

    let step = direction * PLAYER_SPEED * time.delta_secs();
    let bounds = FLOOR_SIZE / 2.0 - ACTOR_SIZE / 2.0;
    let next = (transform.translation.truncate() + step).clamp(-bounds, bounds);
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

fn movement_direction(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    direction.normalize_or_zero()
}

/// One `InteractionRequest` per press of E.
pub fn emit_interaction_requests(
    keyboard: Res<ButtonInput<KeyCode>>,
    lock: Res<PlayerMovementLock>,
    player: Query<&Transform, With<Player>>,
    mut requests: MessageWriter<InteractionRequest>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) || !lock.can_move() {
        return;
    }
    let Ok(transform) = player.single() else {
        return;
    };
    requests.write(InteractionRequest {
        actor_position: transform.translation.truncate(),
    });
}

/// Debug hook: Q distracts the owner on demand.
#[cfg(feature = "core_debug")]
pub fn emit_debug_distraction(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<crate::distraction::events::DistractionRequest>,
) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        info!(target: "core_debug", "Requesting a distraction");
        requests.write(crate::distraction::events::DistractionRequest);
    }
}

/// Applies owner commands, advances the current job, and reports finished jobs.
pub fn run_owner_actuator(
    mut commands: MessageReader<OwnerCommand>,
    clock: Res<SimulationClock>,
    mut actuator: ResMut<OwnerActuator>,
    mut owner: ResMut<OwnerBehavior>,
    mut finished: MessageWriter<OwnerActionFinished>,
    mut avatar: Query<&mut Transform, With<OwnerAvatar>>,
) {
    for command in commands.read() {
        actuator.apply(command);
    }

    let mut position = owner.position();
    if let Some(handle) = actuator.advance(&mut position, clock.last_scaled_delta()) {
        debug!(target: "owner", "Owner action {} finished", handle);
        finished.write(OwnerActionFinished { handle });
    }
    owner.set_position(position);

    if let Ok(mut transform) = avatar.single_mut() {
        transform.translation.x = position.x;
        transform.translation.y = position.y + actuator.bob_offset();
    }
}

/// Hides the item of each completed chore and shows what replaces it.
pub fn apply_chore_visibility(
    mut changes: MessageReader<TaskStateChangedEvent>,
    tasks: Res<TaskRegistry>,
    mut items: Query<(&Interactable, &mut Visibility)>,
) {
    for change in changes.read().filter(|change| change.completed()) {
        let Some(task) = tasks.get(change.task) else {
            continue;
        };
        for (interactable, mut visibility) in items.iter_mut() {
            if interactable.key == task.item_key {
                *visibility = Visibility::Hidden;
            } else if task.reveal_key.as_deref() == Some(interactable.key.as_str()) {
                *visibility = Visibility::Visible;
            }
        }
    }
}
