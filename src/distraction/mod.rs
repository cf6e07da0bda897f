//! Distraction coordinator: interrupts the owner and resumes the parked chore on refocus.
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::DistractionPlugin;
