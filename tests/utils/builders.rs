use aoe2watch::roster::PlayerId;
use aoe2watch::snapshot::{MatchSnapshot, SnapshotPlayer};

pub fn ongoing_snapshot(player: PlayerId, match_id: &str, rating: Option<i32>) -> MatchSnapshot {
    MatchSnapshot {
        match_id: Some(match_id.to_string()),
        ongoing: true,
        map_name: Some("Arabia".to_string()),
        leaderboard: Some("RM 1v1".to_string()),
        started_at: Some("2025-11-17 21:53:02".to_string()),
        duration_seconds: None,
        players: vec![SnapshotPlayer {
            profile_id: Some(player.0),
            rating,
            civilization: Some("Franks".to_string()),
            won: None,
        }],
    }
}

pub fn finished_snapshot(
    player: PlayerId,
    match_id: &str,
    rating: Option<i32>,
    won: Option<bool>,
) -> MatchSnapshot {
    MatchSnapshot {
        match_id: Some(match_id.to_string()),
        ongoing: false,
        map_name: Some("Arabia".to_string()),
        leaderboard: Some("RM 1v1".to_string()),
        started_at: Some("2025-11-17 21:53:02".to_string()),
        duration_seconds: Some(1800),
        players: vec![SnapshotPlayer {
            profile_id: Some(player.0),
            rating,
            civilization: Some("Franks".to_string()),
            won,
        }],
    }
}
