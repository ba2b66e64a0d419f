pub mod builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{finished_snapshot, ongoing_snapshot};
#[allow(unused_imports)]
pub use mocks::{CountingStateRepository, RecordingNotifier, ScriptedDataSource};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
