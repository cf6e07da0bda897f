//! Components and resources for the house scene.
use bevy::prelude::*;

/// Marker for the player-controlled cat.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for the owner's sprite. Its position mirrors `OwnerBehavior`.
#[derive(Component, Debug)]
pub struct OwnerAvatar;

/// Anything the player can interact with, keyed like the chore catalog.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub key: String,
}

impl Interactable {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// The fridge, where the taskboard hangs.
#[derive(Component, Debug)]
pub struct Fridge;

/// Freezes player movement while an overlay owns the keyboard.
#[derive(Resource, Debug, Default)]
pub struct PlayerMovementLock {
    locked: bool,
}

impl PlayerMovementLock {
    pub fn set_movement(&mut self, can_move: bool) {
        self.locked = !can_move;
    }

    pub fn can_move(&self) -> bool {
        !self.locked
    }
}
