pub mod aggregator;
pub mod alerts;
pub mod detector;
pub mod poll_task;
pub mod service;

pub use detector::MatchEvent;
pub use poll_task::start_poll_task;
pub use service::{TickSummary, TrackerService};
