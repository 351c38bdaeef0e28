//! SQLite-backed store for offline use and tests.
//!
//! Provides persistent storage for:
//! - The availability snapshot (one JSON document in the key-value table)
//! - Imported booked sessions
//! - Submitted reviews

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use super::traits::{SessionStore, SnapshotStore};
use crate::error::PersistenceError;
use crate::scheduler::SchedulerDocument;
use crate::session::{ReviewSubmission, SessionRecord};

const SNAPSHOT_KEY: &str = "availability_snapshot";

/// SQLite database holding one expert's data.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open the database at `~/.config/mentorslot/mentorslot.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, PersistenceError> {
        Self::open_at(&data_dir()?.join("mentorslot.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id          TEXT PRIMARY KEY,
                start_time  TEXT NOT NULL,
                end_time    TEXT NOT NULL,
                status      TEXT NOT NULL DEFAULT '',
                meeting_url TEXT,
                reviewed    INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS reviews (
                session_id   TEXT PRIMARY KEY REFERENCES sessions(id),
                ratings      TEXT NOT NULL,
                feedback     TEXT NOT NULL DEFAULT '',
                submitted_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Insert or replace a booked session, as the booking flow would.
    pub fn upsert_session(&self, record: &SessionRecord) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sessions (id, start_time, end_time, status, meeting_url, reviewed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.start_time,
                record.end_time,
                record.status,
                record.meeting_url,
                record.reviewed,
            ],
        )?;
        Ok(())
    }

    /// Stored review for a session, if any.
    pub fn review_for(&self, session_id: &str) -> Result<Option<ReviewSubmission>, PersistenceError> {
        let row = self
            .conn
            .query_row(
                "SELECT ratings, feedback FROM reviews WHERE session_id = ?1",
                params![session_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((ratings, feedback)) => Ok(Some(ReviewSubmission {
                session_id: session_id.to_string(),
                ratings: serde_json::from_str(&ratings)?,
                feedback,
            })),
            None => Ok(None),
        }
    }
}

impl SnapshotStore for LocalStore {
    fn load_snapshot(&self) -> Result<Option<SchedulerDocument>, PersistenceError> {
        match self.kv_get(SNAPSHOT_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, document: &SchedulerDocument) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(document)?;
        self.kv_set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }
}

impl SessionStore for LocalStore {
    fn list_sessions(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_time, end_time, status, meeting_url, reviewed
             FROM sessions
             ORDER BY start_time",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SessionRecord {
                id: row.get(0)?,
                start_time: row.get(1)?,
                end_time: row.get(2)?,
                status: row.get(3)?,
                meeting_url: row.get(4)?,
                reviewed: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn submit_review(&self, review: &ReviewSubmission) -> Result<(), PersistenceError> {
        let tx = self.conn.unchecked_transaction()?;
        let updated = tx.execute(
            "UPDATE sessions SET reviewed = 1, status = 'reviewed' WHERE id = ?1",
            params![review.session_id],
        )?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(review.session_id.clone()));
        }
        tx.execute(
            "INSERT INTO reviews (session_id, ratings, feedback, submitted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                review.session_id,
                serde_json::to_string(&review.ratings)?,
                review.feedback,
                Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(id: &str, start: &str) -> SessionRecord {
        SessionRecord {
            id: id.into(),
            start_time: start.into(),
            end_time: "2024-03-04T23:00:00+00:00".into(),
            status: "upcoming".into(),
            meeting_url: None,
            reviewed: false,
        }
    }

    #[test]
    fn kv_store() {
        let store = LocalStore::open_memory().unwrap();
        assert!(store.kv_get("test").unwrap().is_none());
        store.kv_set("test", "hello").unwrap();
        assert_eq!(store.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn snapshot_is_replaced_wholesale() {
        let store = LocalStore::open_memory().unwrap();
        assert!(store.load_snapshot().unwrap().is_none());

        let mut doc = SchedulerDocument {
            session_duration_minutes: 30,
            max_slots_per_day: 2,
            weekly: BTreeMap::new(),
            break_dates: Vec::new(),
        };
        store.save_snapshot(&doc).unwrap();
        doc.max_slots_per_day = 4;
        store.save_snapshot(&doc).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), Some(doc));
    }

    #[test]
    fn sessions_listed_by_start() {
        let store = LocalStore::open_memory().unwrap();
        store.upsert_session(&record("b", "2024-03-04T12:00:00+00:00")).unwrap();
        store.upsert_session(&record("a", "2024-03-04T09:00:00+00:00")).unwrap();
        let ids: Vec<_> = store.list_sessions().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn review_marks_session_and_is_single_shot() {
        let store = LocalStore::open_memory().unwrap();
        store.upsert_session(&record("s-1", "2024-03-04T09:00:00+00:00")).unwrap();
        let review = ReviewSubmission {
            session_id: "s-1".into(),
            ratings: BTreeMap::from([("overall".to_string(), 5)]),
            feedback: "thanks".into(),
        };
        store.submit_review(&review).unwrap();

        let listed = store.list_sessions().unwrap();
        assert!(listed[0].reviewed);
        assert_eq!(listed[0].status, "reviewed");
        assert_eq!(store.review_for("s-1").unwrap(), Some(review.clone()));

        assert!(matches!(
            store.submit_review(&review),
            Err(PersistenceError::Database(_))
        ));
    }

    #[test]
    fn review_for_unknown_session() {
        let store = LocalStore::open_memory().unwrap();
        let review = ReviewSubmission {
            session_id: "ghost".into(),
            ratings: BTreeMap::from([("overall".to_string(), 3)]),
            feedback: String::new(),
        };
        assert!(matches!(
            store.submit_review(&review),
            Err(PersistenceError::NotFound(_))
        ));
    }
}
