pub mod availability;
pub mod config;
pub mod session;

use std::path::Path;

use mentorslot_core::{
    Config, LocalStore, PersistenceError, RemoteStore, SessionStore, SnapshotStore, StorageMode,
};

/// The store selected by `storage.mode`.
pub enum Backend {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Backend {
    pub fn open(config: &Config) -> Result<Self, PersistenceError> {
        match config.storage.mode {
            StorageMode::Local => {
                let store = match &config.storage.database_path {
                    Some(path) => LocalStore::open_at(Path::new(path))?,
                    None => LocalStore::open()?,
                };
                Ok(Self::Local(store))
            }
            StorageMode::Remote => Ok(Self::Remote(RemoteStore::from_config(&config.backend)?)),
        }
    }

    pub fn snapshots(&self) -> &dyn SnapshotStore {
        match self {
            Self::Local(store) => store,
            Self::Remote(store) => store,
        }
    }

    pub fn sessions(&self) -> &dyn SessionStore {
        match self {
            Self::Local(store) => store,
            Self::Remote(store) => store,
        }
    }

    pub fn local(&self) -> Option<&LocalStore> {
        match self {
            Self::Local(store) => Some(store),
            Self::Remote(_) => None,
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
