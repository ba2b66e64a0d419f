// Library crate for the AoE2 match tracker
// This file exposes the public API for integration tests

pub mod config;
pub mod notify;
pub mod render;
pub mod roster;
pub mod shared;
pub mod snapshot;
pub mod state;
pub mod tracker;

// Re-export commonly used types for easier access in tests
pub use config::Config;
pub use notify::{DeliveryError, Notifier};
pub use roster::{PlayerId, Roster};
pub use shared::AppError;
pub use snapshot::{MatchDataSource, MatchSnapshot, SnapshotPlayer};
pub use state::{MatchOutcome, PlayerState, StateRepository, StateStore};
pub use tracker::{start_poll_task, MatchEvent, TickSummary, TrackerService};
