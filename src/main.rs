use std::path::PathBuf;

use clap::Parser;
use meraki_inventory_report::api::DashboardClient;
use meraki_inventory_report::config::Config;
use meraki_inventory_report::pipeline::{
    self, DEFAULT_COMBINED_REPORT, DEFAULT_REPORTS_DIR, RunOptions,
};
use meraki_inventory_report::{ReportError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let config = Config::from_env()?;
    let client = DashboardClient::new(&config)?;
    let options = cli.into_options();

    let summary = pipeline::run(&client, &options)?;
    info!(
        written = summary.written(),
        failed = summary.failed(),
        "run complete"
    );
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export dashboard device inventory and telemetry to Excel reports."
)]
struct Cli {
    /// Directory receiving one workbook per organization.
    #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
    reports_dir: PathBuf,

    /// Path of the combined workbook.
    #[arg(long, default_value = DEFAULT_COMBINED_REPORT)]
    combined: PathBuf,

    /// Do not build the combined workbook.
    #[arg(long)]
    skip_merge: bool,
}

impl Cli {
    fn into_options(self) -> RunOptions {
        RunOptions {
            reports_dir: self.reports_dir,
            combined_report: (!self.skip_merge).then_some(self.combined),
        }
    }
}
