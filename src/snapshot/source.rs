use async_trait::async_trait;

use super::models::MatchSnapshot;
use crate::roster::PlayerId;

/// Port to the upstream match-statistics provider.
///
/// Implementations absorb their own failures: a fetch that errors out
/// (network, non-2xx status, undecodable payload) is reported as `None` or an
/// empty list, never as an error. Upstream flakiness is steady-state noise
/// for the tracker, not an exceptional condition.
#[async_trait]
pub trait MatchDataSource: Send + Sync {
    /// Latest known match for the player, if the provider has one.
    async fn fetch_last_match(&self, player: PlayerId) -> Option<MatchSnapshot>;

    /// Up to `limit` recent matches, most recent first.
    async fn fetch_recent_matches(&self, player: PlayerId, limit: usize) -> Vec<MatchSnapshot>;
}
