//! Rummy point tracker: library with models, roster logic, and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod storage;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    compute_winner, game_phase, highest_hand_score, parse_score, parse_target, GamePhase,
};
pub use models::{
    avatar_for, available_players, derive_status, CatalogEntry, Player, PlayerStatus, Points,
    RosterError, RosterState, DEFAULT_AVATAR, DEFAULT_TARGET_SCORE,
};
pub use storage::{
    prune_stale_namespaces, FileBackend, JsonStorage, KeyValueBackend, MemoryBackend, Persistence,
    StorageError, STORAGE_KEY,
};
pub use store::RosterStore;
