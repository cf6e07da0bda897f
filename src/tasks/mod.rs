//! Task registry: chore definitions, states, and the item-key index.
pub mod data;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod registry;
pub mod types;

pub use plugin::TasksPlugin;
