//! Booked session lifecycle.
//!
//! A session's phase is derived from the clock on every query; nothing but
//! the review flag is stored.
//!
//! ## State Transitions
//!
//! ```text
//! Scheduled -> Active -> Ended -> Reviewed
//!   (now < start-10m)  (start-10m <= now < end)  (now >= end)  (review submitted)
//! ```
//!
//! Only the last transition is a mutation. The phase reported by the
//! backend (`status`) is kept for display and never trusted.

mod board;
mod countdown;
mod review;

pub use board::{partition_sessions, SessionBoard};
pub use countdown::time_label;
pub use review::{Review, ReviewSubmission, RATING_RANGE};

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ParseError, SessionError};
use crate::storage::SessionStore;

/// How long before its start a session may be joined.
pub const JOIN_BUFFER_MINUTES: i64 = 10;

pub fn join_buffer() -> Duration {
    Duration::minutes(JOIN_BUFFER_MINUTES)
}

/// `true` iff `start - 10min <= now < end`.
pub fn is_active(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start - join_buffer() <= now && now < end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Scheduled,
    Active,
    Ended,
    /// Terminal.
    Reviewed,
}

impl SessionPhase {
    /// Phase from the clock alone.
    pub fn at(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now >= end {
            SessionPhase::Ended
        } else if is_active(now, start, end) {
            SessionPhase::Active
        } else {
            SessionPhase::Scheduled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Scheduled => "scheduled",
            SessionPhase::Active => "active",
            SessionPhase::Ended => "ended",
            SessionPhase::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
}

/// Result of a permitted join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTicket {
    pub session_id: String,
    pub meeting_url: Option<String>,
    pub ends_at: DateTime<Utc>,
}

/// One booked session. Start and end are fixed at booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    status: String,
    meeting_url: Option<String>,
    reviewed: bool,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if end_time <= start_time {
            return Err(SessionError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            id: id.into(),
            start_time,
            end_time,
            status: "upcoming".to_string(),
            meeting_url: None,
            reviewed: false,
        })
    }

    pub fn with_meeting_url(mut self, url: impl Into<String>) -> Self {
        self.meeting_url = Some(url.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Status string as reported by the backend. Informational only.
    pub fn stored_status(&self) -> &str {
        &self.status
    }

    pub fn is_reviewed(&self) -> bool {
        self.reviewed
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase_at(&self, now: DateTime<Utc>) -> SessionPhase {
        if self.reviewed {
            return SessionPhase::Reviewed;
        }
        SessionPhase::at(now, self.start_time, self.end_time)
    }

    pub fn is_joinable_at(&self, now: DateTime<Utc>) -> bool {
        self.phase_at(now) == SessionPhase::Active
    }

    /// "starts in 5m", "ends in 12m" or "Ended".
    pub fn time_label(&self, now: DateTime<Utc>) -> String {
        time_label(now, self.start_time, self.end_time)
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Permit joining while active. Has no side effect either way.
    pub fn join(&self, now: DateTime<Utc>) -> Result<JoinTicket, SessionError> {
        match self.phase_at(now) {
            SessionPhase::Active => Ok(JoinTicket {
                session_id: self.id.clone(),
                meeting_url: self.meeting_url.clone(),
                ends_at: self.end_time,
            }),
            phase => {
                tracing::warn!(session = %self.id, %phase, "join refused");
                Err(SessionError::NotJoinable { phase })
            }
        }
    }

    /// Submit the one review this session accepts.
    ///
    /// Local state flips to `Reviewed` only after the store accepts the
    /// submission; a persistence failure leaves the session as it was.
    pub fn submit_review<S: SessionStore + ?Sized>(
        &mut self,
        store: &S,
        review: Review,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        match self.phase_at(now) {
            SessionPhase::Reviewed => return Err(SessionError::AlreadyReviewed.into()),
            SessionPhase::Ended => {}
            _ => return Err(SessionError::SessionNotEnded.into()),
        }

        let submission = review.into_submission(&self.id);
        if let Err(err) = store.submit_review(&submission) {
            tracing::warn!(session = %self.id, error = %err, "review submission failed");
            return Err(err.into());
        }

        self.reviewed = true;
        self.status = SessionPhase::Reviewed.to_string();
        tracing::info!(session = %self.id, "review submitted");
        Ok(())
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            id: self.id.clone(),
            start_time: self.start_time.to_rfc3339(),
            end_time: self.end_time.to_rfc3339(),
            status: self.status.clone(),
            meeting_url: self.meeting_url.clone(),
            reviewed: self.reviewed,
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ParseError::Instant(raw.to_string()))
}

impl TryFrom<SessionRecord> for Session {
    type Error = CoreError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let start = parse_instant(&record.start_time)?;
        let end = parse_instant(&record.end_time)?;
        let mut session = Session::new(record.id, start, end)?;
        session.status = record.status.clone();
        session.meeting_url = record.meeting_url;
        session.reviewed =
            record.reviewed || record.status.eq_ignore_ascii_case(SessionPhase::Reviewed.as_str());
        Ok(session)
    }
}
