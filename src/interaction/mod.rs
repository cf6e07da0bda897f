//! Interaction coordinator: proximity checks, chore triggering and the owner's chore flow.
pub mod config;
pub mod coordinator;
pub mod plugin;
pub mod systems;
pub mod types;

pub use plugin::InteractionPlugin;
