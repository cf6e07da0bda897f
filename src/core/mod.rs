//! Core module hosting timing, game phases, and the coordination context.
pub mod config;
pub mod context;
pub mod plugin;

pub use plugin::CorePlugin;
