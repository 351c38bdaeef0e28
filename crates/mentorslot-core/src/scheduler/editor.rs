//! Transactional editing of a [`Scheduler`].
//!
//! Commands are applied to a draft. `save` persists the draft as one
//! document and only then promotes it to the committed snapshot. A failed
//! save leaves the committed snapshot untouched and keeps the draft, so the
//! caller decides whether to retry or [`discard`](AvailabilityEditor::discard).

use super::{ScheduleCommand, Scheduler, SchedulerDocument};
use crate::error::{CoreError, PersistenceError, ScheduleError};
use crate::storage::SnapshotStore;

#[derive(Debug, Clone, Default)]
pub struct AvailabilityEditor {
    saved: Scheduler,
    draft: Scheduler,
}

impl AvailabilityEditor {
    pub fn new(saved: Scheduler) -> Self {
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    /// Load the stored snapshot, or start from an empty one.
    pub fn open<S: SnapshotStore + ?Sized>(store: &S) -> Result<Self, CoreError> {
        let saved = match store.load_snapshot()? {
            Some(document) => Scheduler::try_from(document)?,
            None => Scheduler::default(),
        };
        Ok(Self::new(saved))
    }

    /// Last snapshot known to be persisted.
    pub fn saved(&self) -> &Scheduler {
        &self.saved
    }

    /// Working copy including unsaved commands.
    pub fn draft(&self) -> &Scheduler {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.saved != self.draft
    }

    /// Apply one command to the draft. On error the draft is unchanged.
    pub fn apply(&mut self, command: &ScheduleCommand) -> Result<&Scheduler, ScheduleError> {
        match self.draft.apply(command) {
            Ok(next) => {
                self.draft = next;
                Ok(&self.draft)
            }
            Err(err) => {
                tracing::debug!(command = command.name(), error = %err, "schedule command rejected");
                Err(err)
            }
        }
    }

    /// Drop unsaved changes.
    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// Persist the whole draft. No retry is attempted.
    pub fn save<S: SnapshotStore + ?Sized>(&mut self, store: &S) -> Result<&Scheduler, PersistenceError> {
        let document = SchedulerDocument::from(&self.draft);
        match store.save_snapshot(&document) {
            Ok(()) => {
                self.saved = self.draft.clone();
                tracing::info!(slots = self.saved.weekly().total_slots(), "availability saved");
                Ok(&self.saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "availability save failed; committed snapshot kept");
                Err(err)
            }
        }
    }
}
