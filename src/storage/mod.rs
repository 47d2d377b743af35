//! Persistence of the roster: the adapter the store talks to and the key-value backends under it.
//!
//! The payload is the roster's JSON under one fixed key, the way a browser keeps it in local
//! storage. Anything missing or unreadable loads as "absent" rather than failing.

mod backend;
mod json;

pub use backend::{prune_stale_namespaces, FileBackend, KeyValueBackend, MemoryBackend};
pub use json::{decode_roster, JsonStorage, STORAGE_KEY};

use crate::models::RosterState;

/// Errors from saving or clearing persisted state.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Json(e) => write!(f, "could not encode roster: {}", e),
            StorageError::Poisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            StorageError::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// What the roster store needs from durable storage.
pub trait Persistence {
    /// Previously saved roster, or `None` when nothing usable is stored.
    fn load(&self) -> Option<RosterState>;

    fn save(&self, state: &RosterState) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}
