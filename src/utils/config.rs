use std::path::PathBuf;
use std::time::Duration;

/// Default target: the Next.js dev server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the application under test (no `/api` suffix)
    pub base_url: String,

    /// Timeout applied to every outbound request
    pub timeout: Duration,

    /// Output directory for reports
    pub output_dir: PathBuf,

    /// Write JSON and JUnit reports after the run
    pub report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from("./output"),
            report: false,
        }
    }
}

impl Config {
    /// Default configuration pointed at another base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Base URL with a single trailing slash removed
    pub fn root_url(&self) -> &str {
        self.base_url
            .strip_suffix('/')
            .unwrap_or(&self.base_url)
    }

    /// Absolute URL for an API path such as `/health`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.root_url(), path)
    }
}
