//! Ending plugin: watches chore completions and ends the session.
use bevy::prelude::*;

use crate::core::plugin::ChoreSet;

use super::{
    observer::{CompletionObserver, EndingReachedEvent},
    systems::observe_completions,
};

pub struct EndingPlugin;

impl Plugin for EndingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CompletionObserver>()
            .add_message::<EndingReachedEvent>()
            .add_systems(Update, observe_completions.in_set(ChoreSet::Observe));
    }
}
