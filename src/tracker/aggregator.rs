use chrono::{DateTime, Utc};

use crate::roster::PlayerId;
use crate::snapshot::MatchSnapshot;
use crate::state::models::UNKNOWN_CIV;
use crate::state::{MatchOutcome, MatchRecord, PlayerState};

/// Fold one detected match end into the player's rolling statistics.
///
/// Runs exactly once per end event, after the detector has cleared the
/// tracked match. Returns the history record so the caller can render the
/// notification from the same data that was stored.
pub fn record_match_end(
    state: &mut PlayerState,
    player: PlayerId,
    snapshot: &MatchSnapshot,
    outcome: MatchOutcome,
    rating_before: Option<i32>,
    rating_after: Option<i32>,
    now: DateTime<Utc>,
) -> MatchRecord {
    // 1. Streak: a win on a loss streak restarts at +1, and symmetrically.
    state.streak = match outcome {
        MatchOutcome::Win => state.streak.max(0) + 1,
        MatchOutcome::Loss => state.streak.min(0) - 1,
        MatchOutcome::Unknown => 0,
    };

    // 2. Civilization tally. No resolvable civ still gets counted, under
    // the sentinel bucket.
    let civilization = snapshot.civilization_for(player).map(str::to_string);
    if outcome != MatchOutcome::Unknown {
        let bucket = civilization.clone().unwrap_or_else(|| UNKNOWN_CIV.to_string());
        let tally = state.civ_stats.entry(bucket).or_default();
        match outcome {
            MatchOutcome::Win => tally.wins += 1,
            MatchOutcome::Loss => tally.losses += 1,
            MatchOutcome::Unknown => {}
        }
    }

    // 3. Match history (FIFO-capped).
    let record = MatchRecord {
        ended_at: now,
        match_id: snapshot.match_id.clone(),
        map_name: snapshot.map_name.clone(),
        civilization,
        rating_before,
        rating_after,
        rating_delta: match (rating_before, rating_after) {
            (Some(before), Some(after)) => Some(after - before),
            _ => None,
        },
        outcome,
        duration_seconds: snapshot.duration_seconds,
    };
    state.push_match_record(record.clone());

    // 4. Rating history, only when the post-match rating is known.
    if let Some(after) = rating_after {
        state.push_rating(now, after);
    }

    // 5. Playtime, keyed by the end date.
    if let Some(duration) = snapshot.duration_seconds.filter(|d| *d > 0) {
        state.add_playtime(now.date_naive(), duration);
    }

    record
}
