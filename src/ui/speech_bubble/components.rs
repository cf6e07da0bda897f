// src/ui/speech_bubble/components.rs
//
// Speech bubble components for notices shown above the cat and the owner.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::core::context::Speaker;

/// World-space text bubble following a speaker.
#[derive(Component, Debug)]
pub struct SpeechBubble {
    /// Who the bubble is attached to.
    speaker: Speaker,

    /// The lifetime timer. When it expires, the bubble despawns.
    lifetime: Timer,
}

impl SpeechBubble {
    pub fn new(speaker: Speaker, lifetime_secs: f32) -> Self {
        Self {
            speaker,
            lifetime: Timer::from_seconds(lifetime_secs, TimerMode::Once),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.lifetime.tick(delta);
    }

    pub fn is_finished(&self) -> bool {
        self.lifetime.is_finished()
    }

    /// Calculate the alpha fade value (1.0 = fully visible, 0.0 = transparent).
    ///
    /// Fades out during the final `fade_duration` seconds of lifetime.
    pub fn fade_alpha(&self, fade_duration: f32) -> f32 {
        let remaining = self.lifetime.remaining_secs();
        if remaining < fade_duration {
            remaining / fade_duration
        } else {
            1.0
        }
    }
}

/// Ensures each speaker has at most one bubble at a time.
#[derive(Resource, Debug, Default)]
pub struct SpeechBubbleTracker {
    pub by_speaker: HashMap<Speaker, Entity>,
}

#[derive(Resource, Debug)]
pub struct SpeechBubbleSettings {
    /// How long bubbles remain visible (seconds).
    pub lifetime_seconds: f32,

    /// Duration of fade-out animation (seconds).
    pub fade_seconds: f32,

    /// Height above the speaker's centre (world units).
    pub vertical_offset: f32,

    pub font_size: f32,
}

impl Default for SpeechBubbleSettings {
    fn default() -> Self {
        Self {
            lifetime_seconds: 3.0,
            fade_seconds: 1.0,
            vertical_offset: 34.0,
            font_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fades_only_at_the_end_of_its_life() {
        let mut bubble = SpeechBubble::new(Speaker::Owner, 3.0);
        assert_eq!(bubble.fade_alpha(1.0), 1.0);

        bubble.tick(Duration::from_millis(2500));
        assert!((bubble.fade_alpha(1.0) - 0.5).abs() < 1e-3);
        assert!(!bubble.is_finished());

        bubble.tick(Duration::from_secs(1));
        assert!(bubble.is_finished());
        assert_eq!(bubble.speaker(), Speaker::Owner);
    }
}
