//! Scanner module - dispatches probes and streams their outcomes.
//!
//! Probes run as independent tokio tasks. Dispatch happens in ascending
//! port order and pauses at every port that is a multiple of the
//! concurrency limit until the whole batch in flight has drained.

pub mod tcp;
pub mod traits;

use crate::error::{ConfigError, ConfigResult};
use crate::output::{scan_header, Reporter};
use crate::types::{PortRange, ScanTarget};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use tcp::TcpConnectProbe;
pub use traits::{PortOutcome, PortStatus, Probe};

/// Immutable configuration for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Target host as given by the user.
    pub target: String,
    /// Ports to probe.
    pub range: PortRange,
    /// Connect timeout in milliseconds; 0 waits for the OS to give up.
    pub timeout_ms: u64,
    /// Batch size for in-flight probes.
    pub concurrency: usize,
    /// Report closed/filtered ports and grab banners.
    pub verbose: bool,
}

impl ScanOptions {
    /// Build validated scan options.
    pub fn new(
        target: impl Into<String>,
        range: PortRange,
        timeout_ms: u64,
        concurrency: usize,
        verbose: bool,
    ) -> ConfigResult<Self> {
        if concurrency == 0 {
            return Err(ConfigError::InvalidThreads);
        }

        Ok(Self {
            target: target.into(),
            range,
            timeout_ms,
            concurrency,
            verbose,
        })
    }

    /// Connect timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Counts of what a scan produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub probed: usize,
    pub open: usize,
    pub closed: usize,
    pub filtered: usize,
}

impl ScanStats {
    fn record(&mut self, status: PortStatus) {
        self.probed += 1;
        match status {
            PortStatus::Open => self.open += 1,
            PortStatus::Closed => self.closed += 1,
            PortStatus::Filtered => self.filtered += 1,
        }
    }
}

/// Scan a resolved target over TCP, printing the header, every outcome and
/// the completion line through `reporter`.
pub async fn scan(
    options: &ScanOptions,
    target: &ScanTarget,
    reporter: Reporter,
) -> std::io::Result<ScanStats> {
    reporter.line(&scan_header(
        &options.target,
        options.range.start().as_u16(),
        options.range.end().as_u16(),
    ))?;
    if options.verbose {
        reporter.line(&format!(
            "Using {} threads with {}ms timeout",
            options.concurrency, options.timeout_ms
        ))?;
    }

    let probe = Arc::new(TcpConnectProbe::new(
        target.ip,
        options.timeout(),
        options.verbose,
    ));
    let stats = run_scan(options, probe, reporter.clone()).await;

    reporter.line("Scan complete!")?;
    Ok(stats)
}

/// Probe every port in the range, streaming outcomes to `reporter`.
///
/// Batches break after each port that is an exact multiple of
/// `options.concurrency`, so the first batch is shorter when the range does
/// not start on a multiple. Returns once every dispatched probe finished.
pub async fn run_scan<P>(options: &ScanOptions, probe: Arc<P>, reporter: Reporter) -> ScanStats
where
    P: Probe + ?Sized + 'static,
{
    debug!(
        host = %options.target,
        range = %options.range,
        concurrency = options.concurrency,
        timeout_ms = options.timeout_ms,
        "scan started"
    );

    let mut stats = ScanStats::default();
    let mut batch: Vec<JoinHandle<PortStatus>> =
        Vec::with_capacity(options.concurrency.min(options.range.len()));

    for port in options.range.iter() {
        let probe = Arc::clone(&probe);
        let reporter = reporter.clone();

        batch.push(tokio::spawn(async move {
            let outcome = probe.probe(port).await;
            if let Err(e) = reporter.report(&outcome) {
                warn!(port = port.as_u16(), error = %e, "failed to write outcome");
            }
            outcome.status
        }));

        if port.is_multiple_of(options.concurrency) {
            debug!(port = port.as_u16(), in_flight = batch.len(), "draining batch");
            drain(&mut batch, &mut stats).await;
        }
    }
    drain(&mut batch, &mut stats).await;

    debug!(
        probed = stats.probed,
        open = stats.open,
        closed = stats.closed,
        filtered = stats.filtered,
        "scan finished"
    );
    stats
}

/// Wait for every probe in the batch.
async fn drain(batch: &mut Vec<JoinHandle<PortStatus>>, stats: &mut ScanStats) {
    for joined in join_all(batch.drain(..)).await {
        match joined {
            Ok(status) => stats.record(status),
            Err(e) => warn!(error = %e, "probe task failed"),
        }
    }
}
