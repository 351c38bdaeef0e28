//! Core error types for mentorslot-core.
//!
//! Every domain violation is a typed value. Messages are short and specific
//! because the CLI and any embedding UI show them to the user verbatim.

use std::path::PathBuf;
use thiserror::Error;

use crate::availability::DayKey;
use crate::session::SessionPhase;

/// Core error type for mentorslot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed externally-sourced data
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rejected availability command
    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    /// Rejected session lifecycle action
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Storage collaborator failure, surfaced unchanged
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed time strings, day keys, dates or instants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid time '{0}', expected HH:MM")]
    Time(String),

    #[error("unknown day '{0}', expected one of mon, tue, wed, thu, fri, sat, sun")]
    DayKey(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("invalid instant '{0}', expected an ISO-8601 timestamp")]
    Instant(String),

    #[error("break ends ({end}) before it starts ({start})")]
    BreakRange { start: String, end: String },
}

/// Errors returned by availability commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Daily limit reached ({limit} sessions) on {day}")]
    CapacityExceeded { day: DayKey, limit: u8 },

    #[error("Date already blocked: {0}")]
    DuplicateBreakDate(chrono::NaiveDate),

    #[error("No {collection} at position {index} (length: {len})")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        len: usize,
    },

    #[error("Session duration must be 30, 60 or 90 minutes (got {0})")]
    InvalidDuration(u32),

    #[error("Sessions per day must be between 1 and 20 (got {0})")]
    InvalidMaxSlots(u32),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors returned by session lifecycle actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session cannot be joined right now ({phase})")]
    NotJoinable { phase: SessionPhase },

    #[error("Reviews open once the session has ended")]
    SessionNotEnded,

    #[error("Review already submitted")]
    AlreadyReviewed,

    #[error("Rating for '{criterion}' must be between 1 and 5 (got {value})")]
    InvalidRating { criterion: String, value: u8 },

    #[error("A review needs at least one rating")]
    EmptyRatings,

    #[error("Session must end after it starts ({start} .. {end})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },
}

/// Failures of the persistence collaborators (REST backend or local SQLite).
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is invalid: {0}")]
    Corrupt(#[from] ParseError),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home or config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
