use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aoe2watch::config::Config;
use aoe2watch::notify::TelegramNotifier;
use aoe2watch::roster::Roster;
use aoe2watch::snapshot::InsightsApiClient;
use aoe2watch::state::repository::load_or_default;
use aoe2watch::state::{
    InMemoryStateRepository, JsonFileStateRepository, StateRepository, StateStore,
};
use aoe2watch::tracker::{start_poll_task, TrackerService};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aoe2watch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AoE2 match tracker");

    // Missing required configuration stops the process before it can run a
    // single tick.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Refusing to start");
            std::process::exit(1);
        }
    };

    let source = match InsightsApiClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Could not build stats API client");
            std::process::exit(1);
        }
    };

    let notifier = match TelegramNotifier::new(config.bot_token.clone(), config.http_timeout) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            error!(error = %e, "Could not build Telegram client");
            std::process::exit(1);
        }
    };

    let repository: Arc<dyn StateRepository> = match &config.state_file {
        Some(path) => {
            info!(path, "Persisting player state to disk");
            Arc::new(JsonFileStateRepository::new(path))
        }
        None => {
            info!("STATE_FILE not set, keeping player state in memory only");
            Arc::new(InMemoryStateRepository::new())
        }
    };

    let roster = Roster::default_friends();
    let loaded = load_or_default(repository.as_ref()).await;
    let store = StateStore::with_loaded(&roster, loaded);

    let service = Arc::new(TrackerService::new(
        roster,
        store,
        source,
        notifier,
        repository,
        config.chat_id,
    ));

    start_poll_task(service, config.check_interval).await;
}
