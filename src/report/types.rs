use crate::runner::state::RunSummary;
use serde::{Deserialize, Serialize};

/// Test results for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub session_id: String,
    pub base_url: String,
    pub summary: RunSummary,
    pub generated_at: String,
}

impl TestResults {
    pub fn new(session_id: &str, base_url: &str, summary: RunSummary) -> Self {
        Self {
            session_id: session_id.to_string(),
            base_url: base_url.to_string(),
            summary,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
