pub mod checks;
pub mod events;
pub mod executor;
pub mod state;

use anyhow::Result;
use colored::Colorize;

use crate::driver::HttpTransport;
use crate::report::{self, types::TestResults};
use crate::utils::config::Config;

pub use events::*;
pub use executor::ApiTester;
pub use state::*;

/// Run the full smoke suite over HTTP and optionally write reports
///
/// Only building the HTTP client can fail here; check failures are part of
/// the returned summary. A report that cannot be written is logged and the
/// summary is still returned.
pub async fn run_smoke_tests(config: Config) -> Result<RunSummary> {
    let transport = HttpTransport::new(config.timeout)?;
    let mut tester = ApiTester::new(transport, config);
    let summary = tester.run_all_tests().await;

    let config = tester.config();
    if config.report {
        let results = TestResults::new(tester.session_id(), &config.base_url, summary.clone());
        match report::write_reports(&results, &config.output_dir) {
            Ok(paths) => {
                for path in paths {
                    println!(
                        "{} Report saved to: {}",
                        "📄".blue(),
                        path.display().to_string().cyan()
                    );
                }
            }
            Err(e) => log::error!("Failed to write reports: {:#}", e),
        }
    }

    Ok(summary)
}
