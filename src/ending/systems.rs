use bevy::prelude::*;

use crate::{
    core::plugin::GamePhase,
    tasks::{events::TaskStateChangedEvent, registry::TaskRegistry},
};

use super::observer::{CompletionObserver, EndingReachedEvent};

/// Consults the observer after each completion and moves the session to its ending.
pub fn observe_completions(
    mut changes: MessageReader<TaskStateChangedEvent>,
    mut observer: ResMut<CompletionObserver>,
    tasks: Res<TaskRegistry>,
    mut endings: MessageWriter<EndingReachedEvent>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let completed_now = changes.read().filter(|change| change.completed()).count();
    if completed_now == 0 {
        return;
    }
    debug!(
        target: "ending",
        "{} of {} chores complete",
        tasks.completed_count(),
        tasks.len()
    );

    if observer.check_ending(&tasks) {
        info!(
            target: "ending",
            "All {} chores complete, the house is in order",
            tasks.completed_count()
        );
        endings.write(EndingReachedEvent {
            completed: tasks.completed_count(),
        });
        next_phase.set(GamePhase::Ending);
    }
}
