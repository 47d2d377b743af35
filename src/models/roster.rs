//! RosterState and RosterError.

use crate::models::player::{Player, Points};
use serde::{Deserialize, Serialize};

/// Elimination threshold used until a game is started with another one.
pub const DEFAULT_TARGET_SCORE: Points = 320;

/// Errors that can occur during roster operations. None of them change the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name is empty after trimming.
    InvalidName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayer(String),
    /// Not enough players to start (need at least 2).
    InsufficientPlayers { have: usize },
    /// Target score is not a positive integer.
    InvalidTarget,
    /// The player has no hand to edit.
    NoScoreToEdit(String),
    /// Score input is not an integer.
    InvalidScore,
    /// The target is fixed once the game has started.
    GameAlreadyStarted,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::InvalidName => write!(f, "Enter a valid player name"),
            RosterError::DuplicatePlayer(name) => {
                write!(f, "A player named {} already exists", name)
            }
            RosterError::InsufficientPlayers { have } => write!(
                f,
                "At least two players are required to start the game (have {})",
                have
            ),
            RosterError::InvalidTarget => write!(f, "Please set a valid target score"),
            RosterError::NoScoreToEdit(name) => write!(f, "{} has no score to edit", name),
            RosterError::InvalidScore => write!(f, "Score must be a whole number"),
            RosterError::GameAlreadyStarted => write!(f, "The game has already started"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Full roster: players, elimination threshold, and phase flag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterState {
    /// Players in join order.
    pub list: Vec<Player>,
    pub target_score: Points,
    pub game_started: bool,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            target_score: DEFAULT_TARGET_SCORE,
            game_started: false,
        }
    }
}

impl RosterState {
    /// Create an empty roster in setup.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.list.iter().find(|p| p.name == name)
    }

    /// Mutable reference to a player by exact stored name.
    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.list.iter_mut().find(|p| p.name == name)
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    pub fn add_player(&mut self, player: Player) -> Result<(), RosterError> {
        let name = player.name.trim();
        if name.is_empty() {
            return Err(RosterError::InvalidName);
        }
        if self.list.iter().any(|p| p.has_name_like(name)) {
            return Err(RosterError::DuplicatePlayer(name.to_string()));
        }
        let name = name.to_string();
        self.list.push(Player { name, ..player });
        Ok(())
    }

    /// Remove a player by exact name. Returns whether anyone was removed.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let before = self.list.len();
        self.list.retain(|p| p.name != name);
        self.list.len() != before
    }

    /// Re-derive every player's status against the current target.
    pub fn refresh_statuses(&mut self) {
        let target = self.target_score;
        for p in &mut self.list {
            p.refresh_status(target);
        }
    }

    /// Wipe back to an empty roster with the default target.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
