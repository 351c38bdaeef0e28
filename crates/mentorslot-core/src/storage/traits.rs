use crate::error::PersistenceError;
use crate::scheduler::SchedulerDocument;
use crate::session::{ReviewSubmission, SessionRecord};

/// Reads and writes the availability snapshot as a single document.
/// There is no partial update.
pub trait SnapshotStore {
    /// `None` when the expert has never saved availability.
    fn load_snapshot(&self) -> Result<Option<SchedulerDocument>, PersistenceError>;

    /// Replace the stored document wholesale. Last write wins.
    fn save_snapshot(&self, document: &SchedulerDocument) -> Result<(), PersistenceError>;
}

/// Source of booked sessions and sink for reviews.
pub trait SessionStore {
    fn list_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError>;

    /// Single-shot; callers never retry automatically.
    fn submit_review(&self, review: &ReviewSubmission) -> Result<(), PersistenceError>;
}
