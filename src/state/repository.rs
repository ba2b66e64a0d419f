use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::PlayerState;
use crate::shared::AppError;

/// Persistence port for tracked player state, keyed by display name.
///
/// Called once at startup and opportunistically after ticks that mutated
/// state. Failures are recoverable: the tracker keeps running on in-memory
/// state and accepts the data-loss risk.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn load(&self) -> Result<HashMap<String, PlayerState>, AppError>;
    async fn save(&self, states: &HashMap<String, PlayerState>) -> Result<(), AppError>;
}

/// JSON-file implementation for single-instance deployments.
pub struct JsonFileStateRepository {
    path: PathBuf,
}

impl JsonFileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateRepository for JsonFileStateRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<HashMap<String, PlayerState>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet, starting fresh");
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(AppError::Persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let states: HashMap<String, PlayerState> =
            serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Persistence(format!("failed to decode {}: {e}", self.path.display()))
            })?;

        debug!(
            path = %self.path.display(),
            players = states.len(),
            "Loaded persisted player state"
        );
        Ok(states)
    }

    #[instrument(skip(self, states))]
    async fn save(&self, states: &HashMap<String, PlayerState>) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(states)
            .map_err(|e| AppError::Persistence(format!("failed to encode state: {e}")))?;

        // Write to a sibling temp file and rename so a crash mid-write never
        // leaves a truncated state file behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            AppError::Persistence(format!("failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::Persistence(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), players = states.len(), "Saved player state");
        Ok(())
    }
}

/// In-memory implementation for tests and persistence-disabled runs.
#[derive(Default)]
pub struct InMemoryStateRepository {
    states: RwLock<HashMap<String, PlayerState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self) -> Result<HashMap<String, PlayerState>, AppError> {
        Ok(self.states.read().await.clone())
    }

    async fn save(&self, states: &HashMap<String, PlayerState>) -> Result<(), AppError> {
        let mut guard = self.states.write().await;
        *guard = states.clone();
        Ok(())
    }
}

/// Load persisted state, downgrading any failure to an empty map. Startup
/// must not die because last run's file is corrupt.
pub async fn load_or_default(repository: &dyn StateRepository) -> HashMap<String, PlayerState> {
    match repository.load().await {
        Ok(states) => states,
        Err(e) => {
            warn!(error = %e, "Could not load persisted state, starting fresh");
            HashMap::new()
        }
    }
}
