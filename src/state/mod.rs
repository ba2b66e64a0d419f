pub mod models;
pub mod repository;
pub mod store;

pub use models::{CivTally, MatchOutcome, MatchRecord, PlayerState};
pub use repository::{InMemoryStateRepository, JsonFileStateRepository, StateRepository};
pub use store::StateStore;
