//! Persistence collaborators and application configuration.
//!
//! The core never talks to a backend directly; it goes through the
//! [`SnapshotStore`] and [`SessionStore`] traits. Two implementations ship:
//! a SQLite-backed [`LocalStore`] and a REST-backed [`RemoteStore`].

mod config;
pub mod local;
pub mod remote;
mod traits;

pub use config::{BackendConfig, Config, StorageConfig, StorageMode};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use traits::{SessionStore, SnapshotStore};

use std::path::PathBuf;

/// Returns `~/.config/mentorslot[-dev]/` based on MENTORSLOT_ENV.
///
/// Set MENTORSLOT_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MENTORSLOT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mentorslot-dev")
    } else {
        base_dir.join("mentorslot")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
