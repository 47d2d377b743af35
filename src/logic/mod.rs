//! Roster business logic: setup, scoring, standings.

mod scoring;
mod setup;
mod standings;

pub use scoring::{parse_score, record_score, replace_last_score};
pub use setup::{add_player, parse_target, start_game};
pub use standings::{compute_winner, game_phase, highest_hand_score, GamePhase};
