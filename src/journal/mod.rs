//! Session journal of engine events, kept in memory and appended to `logs/`.
pub mod plugin;
pub mod session;

pub use plugin::JournalPlugin;
