//! Setup phase: add players, then start the game (transition from setup to in-progress).

use crate::models::{Player, Points, RosterError, RosterState};

/// Add a player carrying `starting_points`, classified against the current target.
pub fn add_player(
    roster: &mut RosterState,
    name: &str,
    starting_points: Points,
    avatar: Option<String>,
) -> Result<(), RosterError> {
    let player = Player::new(name, starting_points, roster.target_score).with_avatar(avatar);
    roster.add_player(player)
}

/// Start the game: require 2 players and a positive target; fix the target and reclassify everyone.
pub fn start_game(roster: &mut RosterState, target_score: Points) -> Result<(), RosterError> {
    if roster.game_started {
        return Err(RosterError::GameAlreadyStarted);
    }
    if roster.list.len() < 2 {
        return Err(RosterError::InsufficientPlayers {
            have: roster.list.len(),
        });
    }
    if target_score <= 0 {
        return Err(RosterError::InvalidTarget);
    }
    roster.target_score = target_score;
    roster.game_started = true;
    // Players added during setup were classified against the previous target.
    roster.refresh_statuses();
    Ok(())
}

/// Parse a target typed into a form field. Must be a positive integer.
pub fn parse_target(input: &str) -> Result<Points, RosterError> {
    match input.trim().parse::<Points>() {
        Ok(target) if target > 0 => Ok(target),
        _ => Err(RosterError::InvalidTarget),
    }
}
