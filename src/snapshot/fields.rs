//! Field-resolution policy for the upstream match payloads.
//!
//! The stats API has renamed fields across schema revisions (and alternative
//! providers use their own names), so every logical attribute is resolved
//! through one ordered candidate list defined here. The first candidate that
//! yields a usable value wins; if none match the attribute becomes `None`.
//! All tolerance lives in this module so call sites never carry their own
//! fallback chains.

use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::models::{MatchSnapshot, SnapshotPlayer};

const MATCH_ID_FIELDS: &[&str] = &["uuid", "match_id", "matchId"];
const ONGOING_FIELDS: &[&str] = &["ongoing", "is_ongoing"];
const MAP_FIELDS: &[&str] = &["map", "map_name"];
const LEADERBOARD_FIELDS: &[&str] = &["leaderboard"];
const STARTED_FIELDS: &[&str] = &["started", "started_at", "matchstart"];
const DURATION_FIELDS: &[&str] = &["duration", "duration_seconds", "durationSeconds"];
const PLAYER_ID_FIELDS: &[&str] = &["player_id", "profile_id", "profileId"];
const RATING_FIELDS: &[&str] = &["rating", "new_rating", "newRating", "current_rating", "elo"];
const CIV_FIELDS: &[&str] = &["civ", "civilization", "civName"];
const WON_FIELDS: &[&str] = &["won", "winner"];

/// Envelope keys under which the last-match endpoint has nested the match
/// object. A payload that itself carries a `players` array is accepted as-is.
const MATCH_ENVELOPE_KEYS: &[&str] = &["match", "last_match", "data", "result"];

/// Envelope keys for the recent-matches list endpoint.
const MATCH_LIST_KEYS: &[&str] = &["matches", "matchHistory", "results", "data"];

/// Pull the match object out of a last-match response.
pub fn extract_match_payload(data: &Value) -> Option<&Value> {
    for key in MATCH_ENVELOPE_KEYS {
        if let Some(inner) = data.get(key) {
            if inner.is_object() {
                return Some(inner);
            }
        }
    }
    if data.get("players").is_some() {
        return Some(data);
    }
    None
}

/// Pull the match list out of a recent-matches response.
pub fn extract_match_list(data: &Value) -> Option<&Vec<Value>> {
    for key in MATCH_LIST_KEYS {
        if let Some(list) = data.get(key).and_then(Value::as_array) {
            return Some(list);
        }
    }
    data.as_array()
}

/// Decode one match object into a snapshot, applying the resolution policy
/// per attribute. Never fails: unresolvable attributes come back as `None`.
pub fn parse_match_snapshot(value: &Value) -> MatchSnapshot {
    let players = value
        .get("players")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(parse_snapshot_player).collect())
        .unwrap_or_default();

    MatchSnapshot {
        match_id: resolve_identifier(value, MATCH_ID_FIELDS),
        ongoing: resolve_bool(value, ONGOING_FIELDS).unwrap_or(false),
        map_name: resolve_named(value, MAP_FIELDS),
        leaderboard: resolve_named(value, LEADERBOARD_FIELDS),
        started_at: resolve_timestamp(value, STARTED_FIELDS),
        duration_seconds: resolve_u64(value, DURATION_FIELDS),
        players,
    }
}

fn parse_snapshot_player(value: &Value) -> SnapshotPlayer {
    SnapshotPlayer {
        profile_id: resolve_u64(value, PLAYER_ID_FIELDS),
        rating: resolve_i64(value, RATING_FIELDS).and_then(|r| i32::try_from(r).ok()),
        civilization: resolve_named(value, CIV_FIELDS),
        won: resolve_bool(value, WON_FIELDS),
    }
}

/// Opaque identifier: accepts a non-empty string or a number rendered as a
/// string, so UUID-style and numeric match ids compare the same way.
fn resolve_identifier(value: &Value, candidates: &[&str]) -> Option<String> {
    for key in candidates {
        match value.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// String attribute that some schema revisions nest as `{"name": ...}`.
fn resolve_named(value: &Value, candidates: &[&str]) -> Option<String> {
    for key in candidates {
        match value.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Object(obj)) => {
                if let Some(Value::String(s)) = obj.get("name") {
                    if !s.trim().is_empty() {
                        return Some(s.clone());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn resolve_bool(value: &Value, candidates: &[&str]) -> Option<bool> {
    for key in candidates {
        if let Some(b) = value.get(key).and_then(Value::as_bool) {
            return Some(b);
        }
    }
    None
}

fn resolve_u64(value: &Value, candidates: &[&str]) -> Option<u64> {
    for key in candidates {
        if let Some(n) = value.get(key).and_then(Value::as_u64) {
            return Some(n);
        }
    }
    None
}

fn resolve_i64(value: &Value, candidates: &[&str]) -> Option<i64> {
    for key in candidates {
        if let Some(n) = value.get(key).and_then(Value::as_i64) {
            return Some(n);
        }
    }
    None
}

/// Timestamps arrive either as preformatted strings or as seconds since the
/// epoch; normalise both into a display string.
fn resolve_timestamp(value: &Value, candidates: &[&str]) -> Option<String> {
    for key in candidates {
        match value.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => {
                if let Some(secs) = n.as_i64() {
                    if let Some(dt) = Utc.timestamp_opt(secs, 0).single() {
                        return Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());
                    }
                }
            }
            _ => {}
        }
    }
    None
}
