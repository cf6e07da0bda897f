// src/ui/mod.rs
//
// Screen-space UI for the house:
// - Intro and ending cards
// - The fridge taskboard
// - Speech bubbles for notices

pub mod overlays;
pub mod plugin;
pub mod speech_bubble;
pub mod taskboard;

pub use plugin::UiPlugin;
