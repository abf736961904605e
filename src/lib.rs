pub mod driver;
pub mod error;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use error::{ProbeError, ProbeResult};
pub use runner::{run_smoke_tests, ApiTester, RunSummary, TestResult};
pub use utils::config::Config;
