//! Owner module: the non-player actor's behaviour state machine and command channel.
pub mod errors;
pub mod events;
pub mod plugin;
pub mod state;

pub use plugin::OwnerPlugin;
