//! Player and PlayerStatus data structures.

use crate::models::roster::RosterError;
use serde::{Deserialize, Serialize};

/// Points are signed: a hand may be recorded as zero or as a negative correction.
pub type Points = i64;

/// Whether a player is still in the round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Active,
    Eliminated,
}

/// Status for a cumulative total against the elimination threshold.
///
/// Every mutation of a player's points goes through this, so the status can never drift
/// from `points > target_score`.
pub fn derive_status(points: Points, target_score: Points) -> PlayerStatus {
    if points > target_score {
        PlayerStatus::Eliminated
    } else {
        PlayerStatus::Active
    }
}

/// A player in the roster. The name is the identity key and never changes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub points: Points,
    /// One entry per hand, oldest first.
    #[serde(default)]
    pub scores: Vec<Points>,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Player {
    /// Create a player carrying `starting_points`. A positive start counts as the first hand.
    pub fn new(name: impl Into<String>, starting_points: Points, target_score: Points) -> Self {
        let scores = if starting_points > 0 {
            vec![starting_points]
        } else {
            Vec::new()
        };
        Self {
            name: name.into(),
            points: starting_points,
            scores,
            status: derive_status(starting_points, target_score),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = avatar;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn last_score(&self) -> Option<Points> {
        self.scores.last().copied()
    }

    /// Case-insensitive comparison of trimmed names.
    pub fn has_name_like(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Record one hand.
    pub fn add_score(&mut self, points_to_add: Points, target_score: Points) {
        self.points = self.points.saturating_add(points_to_add);
        self.scores.push(points_to_add);
        self.refresh_status(target_score);
    }

    /// Overwrite the most recent hand and return the value it replaced.
    pub fn replace_last_score(
        &mut self,
        new_last_score: Points,
        target_score: Points,
    ) -> Result<Points, RosterError> {
        let last = self
            .scores
            .last_mut()
            .ok_or_else(|| RosterError::NoScoreToEdit(self.name.clone()))?;
        let removed = std::mem::replace(last, new_last_score);
        self.points = self
            .points
            .saturating_sub(removed)
            .saturating_add(new_last_score);
        self.refresh_status(target_score);
        Ok(removed)
    }

    pub fn refresh_status(&mut self, target_score: Points) {
        self.status = derive_status(self.points, target_score);
    }
}
