//! Completion observer and the end of the session.
pub mod observer;
pub mod plugin;
pub mod systems;

pub use plugin::EndingPlugin;
