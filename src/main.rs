use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use nutri_probe::utils::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(name = "nutri-probe")]
#[command(version)]
#[command(about = "Smoke tests for the NutriMed backend API", long_about = None)]
struct Cli {
    /// Root URL of the running application
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Write JSON and JUnit reports after the run
    #[arg(long, default_value = "false")]
    report: bool,

    /// Output directory for reports
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            base_url: self.base_url,
            timeout: Duration::from_secs(self.timeout),
            output_dir: self.output,
            report: self.report,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = cli.into_config();
    log::debug!("config: {:?}", config);

    let summary = nutri_probe::run_smoke_tests(config).await?;
    std::process::exit(summary.exit_code());
}
