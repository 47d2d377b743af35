//! Hand scoring: record a hand, correct the most recent one.

use crate::models::{Points, RosterError, RosterState};

/// Add one hand to a player's history. Returns `false` if no player has this exact name.
pub fn record_score(roster: &mut RosterState, name: &str, points_to_add: Points) -> bool {
    let target = roster.target_score;
    match roster.player_mut(name) {
        Some(p) => {
            p.add_score(points_to_add, target);
            true
        }
        None => false,
    }
}

/// Replace a player's most recent hand.
///
/// Returns the replaced value, or `None` if no player has this exact name. The history
/// length is unchanged and `points` moves by exactly `new_last_score - removed`.
pub fn replace_last_score(
    roster: &mut RosterState,
    name: &str,
    new_last_score: Points,
) -> Result<Option<Points>, RosterError> {
    let target = roster.target_score;
    match roster.player_mut(name) {
        Some(p) => p.replace_last_score(new_last_score, target).map(Some),
        None => Ok(None),
    }
}

/// Parse a hand score typed into a form field. Zero and negative values are valid.
pub fn parse_score(input: &str) -> Result<Points, RosterError> {
    input
        .trim()
        .parse::<Points>()
        .map_err(|_| RosterError::InvalidScore)
}
