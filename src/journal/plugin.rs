//! Journal plugin: records engine events and persists them each frame.
use bevy::prelude::*;

use crate::core::plugin::{ChoreSet, GamePhase};

use super::session::{
    flush_session_journal_log, log_session_summary, record_session_events, SessionJournal,
    SessionJournalLog,
};

pub struct JournalPlugin;

impl Plugin for JournalPlugin {
    fn build(&self, app: &mut App) {
        let log = SessionJournalLog::default();
        info!(target: "journal", "Session journal writing to {:?}", log.path());

        app.insert_resource(SessionJournal::default())
            .insert_resource(log)
            .add_systems(
                Update,
                (
                    record_session_events,
                    flush_session_journal_log.after(record_session_events),
                )
                    .in_set(ChoreSet::Present),
            )
            .add_systems(OnEnter(GamePhase::Ending), log_session_summary);
    }
}
