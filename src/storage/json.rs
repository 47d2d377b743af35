//! JSON payload under a fixed key, and the tolerant decoding used on rehydration.

use crate::models::{Player, Points, RosterState, DEFAULT_TARGET_SCORE};
use crate::storage::{KeyValueBackend, Persistence, StorageError};
use serde::Deserialize;

/// Key the roster is stored under.
pub const STORAGE_KEY: &str = "rummy_players";

/// Shape accepted when reading a payload back. Everything but the player names may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRoster {
    #[serde(default)]
    list: Vec<Player>,
    #[serde(default)]
    target_score: Option<Points>,
    #[serde(default)]
    game_started: Option<bool>,
}

/// Decode a stored payload. Returns `None` if it is not a roster at all.
///
/// A decoded roster is normalized: a missing or non-positive target becomes the default,
/// a missing `gameStarted` means "started" once two players joined, later duplicate names
/// are dropped, and every status is re-derived.
pub fn decode_roster(raw: &str) -> Option<RosterState> {
    let persisted: PersistedRoster = match serde_json::from_str(raw) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Ignoring unreadable saved roster: {}", e);
            return None;
        }
    };

    let target_score = match persisted.target_score {
        Some(t) if t > 0 => t,
        _ => DEFAULT_TARGET_SCORE,
    };
    let game_started = persisted
        .game_started
        .unwrap_or(persisted.list.len() > 1);

    let mut list: Vec<Player> = Vec::with_capacity(persisted.list.len());
    for p in persisted.list {
        if p.name.trim().is_empty() || list.iter().any(|kept| kept.has_name_like(&p.name)) {
            log::warn!("Dropping invalid or duplicate saved player {:?}", p.name);
            continue;
        }
        list.push(p);
    }

    let mut roster = RosterState {
        list,
        target_score,
        game_started,
    };
    roster.refresh_statuses();
    Some(roster)
}

/// Roster persistence as JSON in a key-value backend.
#[derive(Clone, Debug)]
pub struct JsonStorage<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> JsonStorage<B> {
    /// Storage under the standard key.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }
}

impl<B: KeyValueBackend> Persistence for JsonStorage<B> {
    fn load(&self) -> Option<RosterState> {
        match self.backend.get(&self.key) {
            Ok(Some(raw)) => decode_roster(&raw),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read saved roster: {}", e);
                None
            }
        }
    }

    fn save(&self, state: &RosterState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        self.backend.set(&self.key, &raw)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}
