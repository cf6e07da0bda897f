//! The house scene: layout, the cat, the owner's avatar and its actuator.
pub mod actuator;
pub mod components;
pub mod layout;
pub mod plugin;
pub mod systems;

pub use plugin::HousePlugin;
