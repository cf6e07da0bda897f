//! Session journal: a rolling record of engine events, mirrored to a JSON-lines file.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::{
    core::plugin::SimulationClock,
    distraction::events::DistractionEvent,
    ending::observer::EndingReachedEvent,
    owner::{events::OwnerStateChangedEvent, state::OwnerState},
    tasks::{
        events::TaskStateChangedEvent,
        types::{TaskId, TaskState},
    },
};

const DEFAULT_SESSION_JOURNAL_PATH: &str = "logs/session_journal.jsonl";

const DEFAULT_SESSION_JOURNAL_CAPACITY: usize = 64;

const SUMMARY_TAIL: usize = 8;

/// Most recent engine events, oldest dropped first.
#[derive(Resource, Debug)]
pub struct SessionJournal {
    capacity: usize,
    records: VecDeque<JournalRecord>,
}

impl SessionJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: JournalRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &JournalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SessionJournal {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_JOURNAL_CAPACITY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalRecord {
    pub occurred_at_seconds: f64,
    pub event: JournalEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum JournalEvent {
    Task {
        task: TaskId,
        name: String,
        from: TaskState,
        to: TaskState,
    },
    Owner {
        from: OwnerState,
        to: OwnerState,
        task: Option<TaskId>,
    },
    Distraction(DistractionEvent),
    Ending {
        completed: usize,
    },
}

impl From<&TaskStateChangedEvent> for JournalEvent {
    fn from(value: &TaskStateChangedEvent) -> Self {
        Self::Task {
            task: value.task,
            name: value.name.clone(),
            from: value.from,
            to: value.to,
        }
    }
}

impl From<&OwnerStateChangedEvent> for JournalEvent {
    fn from(value: &OwnerStateChangedEvent) -> Self {
        Self::Owner {
            from: value.from,
            to: value.to,
            task: value.task,
        }
    }
}

/// Records every engine event of the frame in the journal and the file log.
pub fn record_session_events(
    clock: Res<SimulationClock>,
    mut journal: ResMut<SessionJournal>,
    mut log: ResMut<SessionJournalLog>,
    mut task_changes: MessageReader<TaskStateChangedEvent>,
    mut owner_changes: MessageReader<OwnerStateChangedEvent>,
    mut distractions: MessageReader<DistractionEvent>,
    mut endings: MessageReader<EndingReachedEvent>,
) {
    let now = clock.elapsed().as_secs_f64();

    let events = task_changes
        .read()
        .map(JournalEvent::from)
        .chain(owner_changes.read().map(JournalEvent::from))
        .chain(distractions.read().map(|event| JournalEvent::Distraction(*event)))
        .chain(endings.read().map(|event| JournalEvent::Ending {
            completed: event.completed,
        }));

    for event in events {
        let record = JournalRecord {
            occurred_at_seconds: now,
            event,
        };
        log.push(&record);
        journal.push(record);
    }
}

/// Logs the tail of the journal when the session ends.
pub fn log_session_summary(journal: Res<SessionJournal>) {
    if journal.is_empty() {
        return;
    }
    info!(
        target: "journal",
        "Session ended with {} journal records in memory; most recent:",
        journal.len()
    );
    let skipped = journal.len().saturating_sub(SUMMARY_TAIL);
    for record in journal.records().skip(skipped) {
        info!(
            target: "journal",
            "  [{:>7.1}s] {:?}",
            record.occurred_at_seconds,
            record.event
        );
    }
}

/// Pending journal lines waiting to be appended to disk.
///
/// The first failed write disables the file log for the rest of the session;
/// the in-memory journal keeps recording.
#[derive(Resource, Debug)]
pub struct SessionJournalLog {
    output_path: PathBuf,
    pending: Vec<JournalRecord>,
    disabled: bool,
}

impl SessionJournalLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
            disabled: false,
        }
    }

    pub fn push(&mut self, record: &JournalRecord) {
        if self.disabled {
            return;
        }
        self.pending.push(record.clone());
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Appends every pending record in a single write. Pending records are
    /// dropped either way; an error disables the log.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let result = self.write_pending();
        self.pending.clear();
        if result.is_err() {
            self.disabled = true;
        }
        result
    }

    fn write_pending(&self) -> std::io::Result<()> {
        let mut buffer = Vec::new();
        for record in &self.pending {
            serde_json::to_writer(&mut buffer, record)?;
            buffer.push(b'\n');
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;
        file.write_all(&buffer)?;
        file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }
}

impl Default for SessionJournalLog {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_JOURNAL_PATH)
    }
}

/// Appends pending lines to disk. Failures only warn, once; play continues.
pub fn flush_session_journal_log(mut log: ResMut<SessionJournalLog>) {
    if let Err(err) = log.flush() {
        warn!(
            target: "journal",
            "Failed to persist session journal to {:?}: {}. File logging disabled.",
            log.path(),
            err
        );
    }
}
