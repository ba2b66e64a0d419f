use serde::{Deserialize, Serialize};

use crate::roster::PlayerId;

/// Point-in-time read of "the latest match" for one player, as reported by
/// the upstream API. Every field except `ongoing` is optional because the
/// upstream schema has drifted more than once; missing data is represented
/// as `None` rather than failing the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: Option<String>,
    pub ongoing: bool,
    pub map_name: Option<String>,
    pub leaderboard: Option<String>,
    pub started_at: Option<String>,
    pub duration_seconds: Option<u64>,
    pub players: Vec<SnapshotPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPlayer {
    pub profile_id: Option<u64>,
    pub rating: Option<i32>,
    pub civilization: Option<String>,
    pub won: Option<bool>,
}

impl MatchSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&SnapshotPlayer> {
        self.players.iter().find(|p| p.profile_id == Some(id.0))
    }

    pub fn rating_for(&self, id: PlayerId) -> Option<i32> {
        self.player(id).and_then(|p| p.rating)
    }

    pub fn civilization_for(&self, id: PlayerId) -> Option<&str> {
        self.player(id).and_then(|p| p.civilization.as_deref())
    }

    pub fn won_for(&self, id: PlayerId) -> Option<bool> {
        self.player(id).and_then(|p| p.won)
    }
}
