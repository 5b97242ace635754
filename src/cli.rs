//! Command-line interface definitions for pscan.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags left
//! unset fall back to the loaded [`AppSettings`].

use crate::config::AppSettings;
use crate::error::{CliResult, ConfigError};
use crate::output::Reporter;
use crate::scanner::{self, ScanOptions};
use crate::types::{PortRange, ScanTarget};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Port Scanner - A simple tool for scanning open ports.
#[derive(Parser, Debug)]
#[command(name = "pscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Port Scanner - A simple tool for scanning open ports", long_about = None)]
pub struct Args {
    /// Target host to scan (required)
    #[arg(short, long, value_name = "HOST")]
    pub target: Option<String>,

    /// Port range to scan, format start-end [default: 1-1000]
    #[arg(short, long, value_name = "START-END")]
    pub ports: Option<String>,

    /// Scan all ports (1-65535)
    #[arg(short, long)]
    pub all: bool,

    /// Scan only common ports (1-1024)
    #[arg(long)]
    pub common: bool,

    /// Connection timeout in milliseconds [default: 2000]
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Number of concurrent probes [default: 100]
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Report closed and filtered ports and grab banners
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Turn flags and settings into validated scan options.
    ///
    /// The port range is only checked here, after the target has resolved.
    pub fn scan_options(
        &self,
        target: &ScanTarget,
        settings: &AppSettings,
    ) -> CliResult<ScanOptions> {
        let ports = self.ports.as_deref().unwrap_or(&settings.default_ports);
        let range = PortRange::select(self.all, self.common, ports)?;

        let options = ScanOptions::new(
            target.original.clone(),
            range,
            self.timeout.unwrap_or(settings.default_timeout_ms),
            self.threads.unwrap_or(settings.default_threads),
            self.verbose || settings.verbose,
        )?;
        Ok(options)
    }
}

/// Validate everything, then scan.
///
/// Every error returned here happens before the first probe is sent.
pub async fn run(args: Args) -> CliResult<()> {
    let target = args.target.as_deref().ok_or(ConfigError::MissingTarget)?;
    let settings = AppSettings::load(args.config.as_deref())?;

    let target = ScanTarget::resolve(target).await?;
    let options = args.scan_options(&target, &settings)?;

    let stats = scanner::scan(&options, &target, Reporter::stdout(options.verbose)).await?;
    debug!(?stats, "done");
    Ok(())
}
