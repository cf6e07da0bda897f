//! Fixed positions and speeds of the house scene.
use bevy::prelude::*;

/// The cat starts in the kitchen.
pub const PLAYER_START: Vec2 = Vec2::new(-50.0, -95.0);
pub const PLAYER_SPEED: f32 = 150.0;
pub const OWNER_WALK_SPEED: f32 = 100.0;

pub const FRIDGE_POSITION: Vec2 = Vec2::new(-120.0, -15.0);
pub const FRIDGE_RADIUS: f32 = 60.0;

pub const FLOOR_SIZE: Vec2 = Vec2::new(1100.0, 760.0);
pub const ACTOR_SIZE: Vec2 = Vec2::splat(32.0);
pub const ITEM_SIZE: Vec2 = Vec2::splat(26.0);

pub const PLAYER_Z: f32 = 5.0;
pub const OWNER_Z: f32 = 5.0;
pub const ITEM_Z: f32 = 3.0;
pub const DIRT_Z: f32 = 2.0;

/// Whether `position` is close enough to open the taskboard.
pub fn near_fridge(position: Vec2) -> bool {
    position.distance(FRIDGE_POSITION) < FRIDGE_RADIUS
}
