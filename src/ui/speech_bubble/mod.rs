// src/ui/speech_bubble/mod.rs
//
// Text2d bubbles above the cat and the owner:
// - Spawned from `Notice` messages, one bubble per speaker
// - Follow the speaker's Transform
// - Fade out and despawn after a lifetime

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::SpeechBubblePlugin;
