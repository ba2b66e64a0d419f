use tracing::debug;

use crate::roster::PlayerId;
use crate::snapshot::MatchSnapshot;
use crate::state::{MatchOutcome, PlayerState};

/// What one snapshot meant for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Nothing to report: no data, same match still running, or a finished
    /// match this process never saw start.
    None,
    /// A match id we were not tracking turned up as ongoing.
    Started,
    /// The tracked match turned up as finished.
    Ended {
        rating_before: Option<i32>,
        rating_after: Option<i32>,
        outcome: MatchOutcome,
    },
}

/// Transition detection: fold the latest snapshot into the player's state
/// and report the lifecycle event, if any.
///
/// Match identity is decided solely by the opaque match id; ratings are only
/// used for deltas and result classification. A missing snapshot is expected
/// upstream noise and never an error. A snapshot whose match id cannot be
/// resolved at all carries no identity, so it is treated the same way.
pub fn detect(
    state: &mut PlayerState,
    player: PlayerId,
    snapshot: Option<&MatchSnapshot>,
) -> MatchEvent {
    let Some(snapshot) = snapshot else {
        return MatchEvent::None;
    };
    let Some(match_id) = snapshot.match_id.as_deref() else {
        debug!(%player, "Snapshot without a resolvable match id, skipping");
        return MatchEvent::None;
    };

    let rating_now = snapshot.rating_for(player);
    let is_tracked = state.current_match_id.as_deref() == Some(match_id);

    if snapshot.ongoing {
        if is_tracked {
            // Same match still running.
            if rating_now.is_some() {
                state.last_known_rating = rating_now;
            }
            return MatchEvent::None;
        }

        // New match start. Prefer the previously known rating as "before":
        // the in-match figure may already reflect this match.
        let rating_before = state.last_known_rating.or(rating_now);
        state.current_match_id = Some(match_id.to_string());
        state.rating_before_current_match = rating_before;
        if rating_now.is_some() {
            state.last_known_rating = rating_now;
        }
        return MatchEvent::Started;
    }

    // Finished snapshot.
    if !is_tracked {
        // Either no tracked match or a match we already processed (or never
        // saw start). Still record the rating; it is the freshest we have.
        if rating_now.is_some() {
            state.last_known_rating = rating_now;
        }
        return MatchEvent::None;
    }

    let rating_before = state.rating_before_current_match;
    let rating_after = rating_now;
    let outcome = classify_outcome(snapshot.won_for(player), rating_before, rating_after);

    state.current_match_id = None;
    state.rating_before_current_match = None;
    if rating_now.is_some() {
        state.last_known_rating = rating_now;
    }

    MatchEvent::Ended {
        rating_before,
        rating_after,
        outcome,
    }
}

/// An explicit result flag from the snapshot wins; otherwise fall back to
/// the sign of the rating delta. No delta, or a zero delta, stays unknown.
pub fn classify_outcome(
    won: Option<bool>,
    rating_before: Option<i32>,
    rating_after: Option<i32>,
) -> MatchOutcome {
    match won {
        Some(true) => MatchOutcome::Win,
        Some(false) => MatchOutcome::Loss,
        None => match (rating_before, rating_after) {
            (Some(before), Some(after)) if after > before => MatchOutcome::Win,
            (Some(before), Some(after)) if after < before => MatchOutcome::Loss,
            _ => MatchOutcome::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotPlayer;
    use rstest::rstest;

    const PLAYER: PlayerId = PlayerId(10);

    fn snapshot(match_id: Option<&str>, ongoing: bool, rating: Option<i32>) -> MatchSnapshot {
        MatchSnapshot {
            match_id: match_id.map(str::to_string),
            ongoing,
            map_name: Some("Arabia".to_string()),
            leaderboard: None,
            started_at: None,
            duration_seconds: None,
            players: vec![SnapshotPlayer {
                profile_id: Some(PLAYER.0),
                rating,
                civilization: None,
                won: None,
            }],
        }
    }

    #[test]
    fn missing_snapshot_is_a_noop() {
        let mut state = PlayerState::default();
        state.last_known_rating = Some(1000);

        for _ in 0..5 {
            assert_eq!(detect(&mut state, PLAYER, None), MatchEvent::None);
        }
        assert_eq!(state.last_known_rating, Some(1000));
        assert!(state.current_match_id.is_none());
    }

    #[test]
    fn ongoing_with_new_id_starts_tracking_and_prefers_known_rating() {
        let mut state = PlayerState::default();
        state.last_known_rating = Some(1000);

        let event = detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(1012))));

        assert_eq!(event, MatchEvent::Started);
        assert_eq!(state.current_match_id.as_deref(), Some("A"));
        // The stored pre-match rating is the previously known one, not the
        // possibly already-adjusted in-match figure.
        assert_eq!(state.rating_before_current_match, Some(1000));
        assert_eq!(state.last_known_rating, Some(1012));
    }

    #[test]
    fn start_falls_back_to_snapshot_rating_when_nothing_known() {
        let mut state = PlayerState::default();

        let event = detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(987))));

        assert_eq!(event, MatchEvent::Started);
        assert_eq!(state.rating_before_current_match, Some(987));
    }

    #[test]
    fn repeated_ongoing_snapshots_emit_a_single_start() {
        let mut state = PlayerState::default();

        assert_eq!(
            detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(1000)))),
            MatchEvent::Started
        );
        for rating in [1000, 1001, 999] {
            assert_eq!(
                detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(rating)))),
                MatchEvent::None
            );
        }
        assert_eq!(state.current_match_id.as_deref(), Some("A"));
        assert_eq!(state.last_known_rating, Some(999));
    }

    #[test]
    fn tracked_match_finishing_ends_exactly_once() {
        let mut state = PlayerState::default();
        state.last_known_rating = Some(1000);

        detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(1000))));

        let finished = snapshot(Some("A"), false, Some(1020));
        let event = detect(&mut state, PLAYER, Some(&finished));
        assert_eq!(
            event,
            MatchEvent::Ended {
                rating_before: Some(1000),
                rating_after: Some(1020),
                outcome: MatchOutcome::Win,
            }
        );
        assert!(state.current_match_id.is_none());
        assert!(state.rating_before_current_match.is_none());

        // The same finished snapshot on the next tick must not re-fire.
        assert_eq!(detect(&mut state, PLAYER, Some(&finished)), MatchEvent::None);
        assert_eq!(state.last_known_rating, Some(1020));
    }

    #[test]
    fn finished_snapshot_for_untracked_match_is_skipped_but_updates_rating() {
        let mut state = PlayerState::default();
        state.last_known_rating = Some(1000);

        let event = detect(&mut state, PLAYER, Some(&snapshot(Some("Z"), false, Some(985))));

        assert_eq!(event, MatchEvent::None);
        assert!(state.current_match_id.is_none());
        assert_eq!(state.last_known_rating, Some(985));
    }

    #[test]
    fn switching_match_ids_while_ongoing_starts_the_new_match() {
        let mut state = PlayerState::default();

        detect(&mut state, PLAYER, Some(&snapshot(Some("A"), true, Some(1000))));
        let event = detect(&mut state, PLAYER, Some(&snapshot(Some("B"), true, Some(1000))));

        assert_eq!(event, MatchEvent::Started);
        assert_eq!(state.current_match_id.as_deref(), Some("B"));
    }

    #[test]
    fn snapshot_without_match_id_is_ignored() {
        let mut state = PlayerState::default();
        state.last_known_rating = Some(1000);

        let event = detect(&mut state, PLAYER, Some(&snapshot(None, true, Some(1050))));

        assert_eq!(event, MatchEvent::None);
        assert!(state.current_match_id.is_none());
        assert_eq!(state.last_known_rating, Some(1000));
    }

    #[rstest]
    #[case(Some(true), None, None, MatchOutcome::Win)]
    #[case(Some(false), Some(1000), Some(1020), MatchOutcome::Loss)]
    #[case(None, Some(1000), Some(1020), MatchOutcome::Win)]
    #[case(None, Some(1000), Some(980), MatchOutcome::Loss)]
    #[case(None, Some(1000), Some(1000), MatchOutcome::Unknown)]
    #[case(None, None, Some(1020), MatchOutcome::Unknown)]
    #[case(None, Some(1000), None, MatchOutcome::Unknown)]
    fn outcome_prefers_explicit_flag_then_delta_sign(
        #[case] won: Option<bool>,
        #[case] before: Option<i32>,
        #[case] after: Option<i32>,
        #[case] expected: MatchOutcome,
    ) {
        assert_eq!(classify_outcome(won, before, after), expected);
    }
}
