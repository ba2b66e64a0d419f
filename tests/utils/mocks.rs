use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use aoe2watch::notify::{DeliveryError, Notifier};
use aoe2watch::roster::PlayerId;
use aoe2watch::shared::AppError;
use aoe2watch::snapshot::{MatchDataSource, MatchSnapshot};
use aoe2watch::state::{PlayerState, StateRepository};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Data source fed from per-player scripts: each fetch pops the next queued
/// response, and an exhausted script keeps answering "no data".
#[derive(Default)]
pub struct ScriptedDataSource {
    last_match_scripts: RwLock<HashMap<u64, VecDeque<Option<MatchSnapshot>>>>,
    recent_matches: RwLock<HashMap<u64, Vec<MatchSnapshot>>>,
}

impl ScriptedDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn queue_last_match(&self, player: PlayerId, response: Option<MatchSnapshot>) {
        self.last_match_scripts
            .write()
            .await
            .entry(player.0)
            .or_default()
            .push_back(response);
    }

    pub async fn set_recent_matches(&self, player: PlayerId, matches: Vec<MatchSnapshot>) {
        self.recent_matches.write().await.insert(player.0, matches);
    }
}

#[async_trait]
impl MatchDataSource for ScriptedDataSource {
    async fn fetch_last_match(&self, player: PlayerId) -> Option<MatchSnapshot> {
        self.last_match_scripts
            .write()
            .await
            .get_mut(&player.0)
            .and_then(|script| script.pop_front())
            .flatten()
    }

    async fn fetch_recent_matches(&self, player: PlayerId, limit: usize) -> Vec<MatchSnapshot> {
        self.recent_matches
            .read()
            .await
            .get(&player.0)
            .map(|matches| matches.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

/// Captures delivered messages; can be switched into a failing mode to
/// exercise the delivery-failure path.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: RwLock<Vec<(i64, String)>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages
            .read()
            .await
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("scripted failure".to_string()));
        }
        self.messages
            .write()
            .await
            .push((chat_id, text.to_string()));
        Ok(())
    }
}

/// In-memory repository that counts saves, so tests can assert that state is
/// persisted only after mutating ticks.
#[derive(Default)]
pub struct CountingStateRepository {
    states: RwLock<HashMap<String, PlayerState>>,
    save_count: AtomicUsize,
}

impl CountingStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub async fn saved_state(&self, name: &str) -> Option<PlayerState> {
        self.states.read().await.get(name).cloned()
    }
}

#[async_trait]
impl StateRepository for CountingStateRepository {
    async fn load(&self) -> Result<HashMap<String, PlayerState>, AppError> {
        Ok(self.states.read().await.clone())
    }

    async fn save(&self, states: &HashMap<String, PlayerState>) -> Result<(), AppError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.states.write().await;
        *guard = states.clone();
        Ok(())
    }
}
