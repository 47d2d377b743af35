//! Roster store: one roster plus the storage it is persisted to.
//!
//! Every successful mutation is saved before the call returns. Storage failures are logged and
//! never undo or block the in-memory change.

use crate::logic::{self, GamePhase};
use crate::models::{Player, Points, RosterError, RosterState};
use crate::storage::Persistence;

pub struct RosterStore<P> {
    state: RosterState,
    storage: P,
}

impl<P: Persistence> RosterStore<P> {
    /// Open a store, rehydrating whatever `storage` holds (an empty roster if nothing usable).
    pub fn open(storage: P) -> Self {
        let state = match storage.load() {
            Some(state) => {
                log::debug!("Rehydrated roster with {} player(s)", state.list.len());
                state
            }
            None => RosterState::new(),
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn winner(&self) -> Option<&Player> {
        logic::compute_winner(&self.state.list)
    }

    pub fn phase(&self) -> GamePhase {
        logic::game_phase(&self.state)
    }

    pub fn add_player(&mut self, name: &str, starting_points: Points) -> Result<(), RosterError> {
        self.add_player_with_avatar(name, starting_points, None)
    }

    pub fn add_player_with_avatar(
        &mut self,
        name: &str,
        starting_points: Points,
        avatar: Option<String>,
    ) -> Result<(), RosterError> {
        logic::add_player(&mut self.state, name, starting_points, avatar)?;
        log::info!("Player {} joined with {} point(s)", name.trim(), starting_points);
        self.persist();
        Ok(())
    }

    /// Remove a player by exact name. Unknown names are ignored.
    pub fn delete_player(&mut self, name: &str) -> Result<(), RosterError> {
        if self.state.remove_player(name) {
            log::info!("Player {} removed", name);
            self.persist();
        } else {
            log::debug!("delete_player: no player named {:?}", name);
        }
        Ok(())
    }

    /// Record one hand. Unknown names are ignored.
    pub fn record_score(&mut self, name: &str, points_to_add: Points) -> Result<(), RosterError> {
        if logic::record_score(&mut self.state, name, points_to_add) {
            self.persist();
        } else {
            log::debug!("record_score: no player named {:?}", name);
        }
        Ok(())
    }

    /// Correct the most recent hand. Unknown names are ignored.
    pub fn replace_last_score(
        &mut self,
        name: &str,
        new_last_score: Points,
    ) -> Result<(), RosterError> {
        match logic::replace_last_score(&mut self.state, name, new_last_score)? {
            Some(removed) => {
                log::info!("{}: last hand {} corrected to {}", name, removed, new_last_score);
                self.persist();
            }
            None => log::debug!("replace_last_score: no player named {:?}", name),
        }
        Ok(())
    }

    pub fn start_game(&mut self, target_score: Points) -> Result<(), RosterError> {
        logic::start_game(&mut self.state, target_score)?;
        log::info!(
            "Game started with {} players, target {}",
            self.state.list.len(),
            target_score
        );
        self.persist();
        Ok(())
    }

    /// Wipe the roster and erase what is stored. Always succeeds.
    pub fn reset_game(&mut self) {
        self.state.reset();
        if let Err(e) = self.storage.clear() {
            log::warn!("Could not clear saved roster: {}", e);
        }
        log::info!("Game reset");
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            log::warn!("Could not save roster: {}", e);
        }
    }
}
