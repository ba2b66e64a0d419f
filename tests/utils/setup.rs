use std::collections::HashMap;
use std::sync::Arc;

use aoe2watch::roster::Roster;
use aoe2watch::state::{PlayerState, StateStore};
use aoe2watch::tracker::TrackerService;

use super::mocks::{CountingStateRepository, RecordingNotifier, ScriptedDataSource};

pub const TEST_CHAT_ID: i64 = -1000;

pub struct TestSetup {
    pub service: Arc<TrackerService>,
    pub source: Arc<ScriptedDataSource>,
    pub notifier: Arc<RecordingNotifier>,
    pub repository: Arc<CountingStateRepository>,
}

/// Builder for wiring a TrackerService against the mock ports.
pub struct TestSetupBuilder {
    players: Vec<(String, u64)>,
    initial_states: HashMap<String, PlayerState>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            initial_states: HashMap::new(),
        }
    }

    pub fn with_player(mut self, name: &str, id: u64) -> Self {
        self.players.push((name.to_string(), id));
        self
    }

    pub fn with_initial_state(mut self, name: &str, state: PlayerState) -> Self {
        self.initial_states.insert(name.to_string(), state);
        self
    }

    pub fn build(self) -> TestSetup {
        let roster = Roster::new(self.players);
        let store = StateStore::with_loaded(&roster, self.initial_states);

        let source = Arc::new(ScriptedDataSource::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let repository = Arc::new(CountingStateRepository::new());

        let service = Arc::new(TrackerService::new(
            roster,
            store,
            source.clone(),
            notifier.clone(),
            repository.clone(),
            TEST_CHAT_ID,
        ));

        TestSetup {
            service,
            source,
            notifier,
            repository,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
