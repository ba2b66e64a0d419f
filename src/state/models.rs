use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use strum_macros::Display;

/// Oldest entries are evicted first once a history hits its cap.
pub const MATCH_HISTORY_CAP: usize = 50;
pub const RATING_HISTORY_CAP: usize = 100;

pub const DEFAULT_TILT_THRESHOLD: i32 = 3;

/// Bucket name used when a finished match carries no resolvable civilization.
pub const UNKNOWN_CIV: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MatchOutcome {
    Win,
    Loss,
    /// Draw, or not enough data to classify.
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivTally {
    pub wins: u32,
    pub losses: u32,
}

/// One processed match end, as stored in a player's bounded history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// When this process observed the end, not when the match ended upstream.
    pub ended_at: DateTime<Utc>,
    pub match_id: Option<String>,
    pub map_name: Option<String>,
    pub civilization: Option<String>,
    pub rating_before: Option<i32>,
    pub rating_after: Option<i32>,
    pub rating_delta: Option<i32>,
    pub outcome: MatchOutcome,
    pub duration_seconds: Option<u64>,
}

/// Mutable per-player tracking record.
///
/// `current_match_id` is `Some` exactly while a detected start has not yet
/// been matched by its end. Only the transition detector and the statistics
/// aggregator mutate this struct, and always from the single tick writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub current_match_id: Option<String>,
    pub rating_before_current_match: Option<i32>,
    pub last_known_rating: Option<i32>,
    /// Signed run length: positive = consecutive wins, negative =
    /// consecutive losses. Flips to exactly ±1 on an opposite result.
    pub streak: i32,
    pub civ_stats: HashMap<String, CivTally>,
    pub match_history: VecDeque<MatchRecord>,
    pub rating_history: VecDeque<(DateTime<Utc>, i32)>,
    /// Whole seconds of play keyed by the match's end date.
    pub playtime_by_day: BTreeMap<NaiveDate, u64>,
    pub tilt_threshold: i32,
    pub elo_alert_thresholds: BTreeSet<i32>,
    /// Thresholds that already fired; a threshold in here never fires again.
    pub triggered_elo_alerts: BTreeSet<i32>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_match_id: None,
            rating_before_current_match: None,
            last_known_rating: None,
            streak: 0,
            civ_stats: HashMap::new(),
            match_history: VecDeque::new(),
            rating_history: VecDeque::new(),
            playtime_by_day: BTreeMap::new(),
            tilt_threshold: DEFAULT_TILT_THRESHOLD,
            elo_alert_thresholds: BTreeSet::new(),
            triggered_elo_alerts: BTreeSet::new(),
        }
    }
}

impl PlayerState {
    pub fn push_match_record(&mut self, record: MatchRecord) {
        self.match_history.push_back(record);
        while self.match_history.len() > MATCH_HISTORY_CAP {
            self.match_history.pop_front();
        }
    }

    pub fn push_rating(&mut self, at: DateTime<Utc>, rating: i32) {
        self.rating_history.push_back((at, rating));
        while self.rating_history.len() > RATING_HISTORY_CAP {
            self.rating_history.pop_front();
        }
    }

    pub fn add_playtime(&mut self, day: NaiveDate, seconds: u64) {
        *self.playtime_by_day.entry(day).or_insert(0) += seconds;
    }
}
