use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::warn;

use super::models::PlayerState;
use crate::roster::Roster;

/// Owner of all per-player tracking state, keyed by display name.
///
/// Every registered player gets a state record at construction and keeps it
/// for the process lifetime. All mutation happens through the single write
/// guard taken by the tick, so the invariants in the models hold without any
/// finer-grained locking.
pub struct StateStore {
    players: RwLock<HashMap<String, PlayerState>>,
}

impl StateStore {
    pub fn new(roster: &Roster) -> Self {
        Self::with_loaded(roster, HashMap::new())
    }

    /// Seed from persisted state. Entries for players no longer in the
    /// roster are dropped; registered players without a persisted entry
    /// start fresh.
    pub fn with_loaded(roster: &Roster, mut loaded: HashMap<String, PlayerState>) -> Self {
        let mut players = HashMap::with_capacity(roster.len());
        for entry in roster.entries() {
            let state = loaded.remove(&entry.name).unwrap_or_default();
            players.insert(entry.name.clone(), state);
        }
        for name in loaded.keys() {
            warn!(player = %name, "Dropping persisted state for unregistered player");
        }
        Self {
            players: RwLock::new(players),
        }
    }

    /// Read-only copy of one player's state, for the query surface.
    pub async fn get(&self, name: &str) -> Option<PlayerState> {
        self.players.read().await.get(name).cloned()
    }

    /// Read-only copy of the whole map, for persistence and the leaderboard.
    pub async fn all(&self) -> HashMap<String, PlayerState> {
        self.players.read().await.clone()
    }

    /// Exclusive access for the tick. Holding the guard serializes all
    /// mutation onto the caller.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PlayerState>> {
        self.players.write().await
    }
}
