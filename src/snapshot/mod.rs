pub mod fields;
pub mod http;
pub mod models;
pub mod source;

pub use http::InsightsApiClient;
pub use models::{MatchSnapshot, SnapshotPlayer};
pub use source::MatchDataSource;
