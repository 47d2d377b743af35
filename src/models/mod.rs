//! Data structures for the rummy tracker: players, roster state, player catalog.

mod catalog;
mod player;
mod roster;

pub use catalog::{avatar_for, available_players, find_catalog_player, CatalogEntry, DEFAULT_AVATAR};
pub use player::{derive_status, Player, PlayerStatus, Points};
pub use roster::{RosterError, RosterState, DEFAULT_TARGET_SCORE};
