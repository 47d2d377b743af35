//! Derived views of the roster: winner, phase, highest hand.

use crate::models::{Player, Points, RosterState};
use serde::Serialize;

/// Game-level phase as shown to the players.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Adding players and choosing the target; not started.
    Setup,
    /// Hands are being scored.
    InProgress,
    /// Everyone but one player is eliminated.
    Finished,
}

/// The sole active player, if exactly one remains.
pub fn compute_winner(list: &[Player]) -> Option<&Player> {
    let mut active = list.iter().filter(|p| p.is_active());
    match (active.next(), active.next()) {
        (Some(winner), None) => Some(winner),
        _ => None,
    }
}

pub fn game_phase(roster: &RosterState) -> GamePhase {
    if !roster.game_started {
        GamePhase::Setup
    } else if roster.list.len() >= 2 && compute_winner(&roster.list).is_some() {
        GamePhase::Finished
    } else {
        GamePhase::InProgress
    }
}

/// Largest single hand anyone has recorded, never below zero.
/// Used as the default starting value for a player joining mid-game.
pub fn highest_hand_score(list: &[Player]) -> Points {
    list.iter()
        .flat_map(|p| p.scores.iter().copied())
        .fold(0, Points::max)
}
