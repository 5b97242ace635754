//! Output formatting module.
//!
//! Scan results are streamed line by line as probes finish. Every probe
//! writes through the same [`Reporter`], which holds a lock for the whole
//! of one outcome so that an open-port line and its banner stay together.

use crate::scanner::{PortOutcome, PortStatus};
use console::style;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, serialized line sink for scan output.
#[derive(Clone)]
pub struct Reporter {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    verbose: bool,
}

impl Reporter {
    /// Create a reporter over any writer.
    pub fn new(writer: impl Write + Send + 'static, verbose: bool) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            verbose,
        }
    }

    /// Create a reporter writing to standard output.
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }

    /// Write one free-form line.
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.write_block(&format!("{}\n", text))
    }

    /// Write the lines for one outcome, if verbosity lets it through.
    pub fn report(&self, outcome: &PortOutcome) -> io::Result<()> {
        match format_outcome(outcome, self.verbose) {
            Some(block) => self.write_block(&block),
            None => Ok(()),
        }
    }

    fn write_block(&self, block: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(block.as_bytes())?;
        out.flush()
    }
}

/// Render an outcome as newline-terminated output lines.
///
/// Closed and filtered ports are dropped unless `verbose` is set.
pub fn format_outcome(outcome: &PortOutcome, verbose: bool) -> Option<String> {
    let port = outcome.port;
    match outcome.status {
        PortStatus::Open => {
            let mut block = match outcome.service {
                Some(service) => format!("Port {}/tcp open - {}\n", port, service),
                None => format!("Port {}/tcp open\n", port),
            };
            if let Some(banner) = &outcome.banner {
                block.push_str(&format!("  └─ Banner: {}\n", banner));
            }
            Some(block)
        }
        _ if !verbose => None,
        status => {
            let reason = outcome
                .error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown".to_string());
            Some(format!("Port {}/tcp {} ({})\n", port, status, reason))
        }
    }
}

/// The line announcing a scan.
pub fn scan_header(target: &str, start: u16, end: u16) -> String {
    format!("Starting port scan on {} (ports {}-{})", target, start, end)
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a hint following an error.
pub fn print_hint(msg: &str) {
    eprintln!("{} {}", style("Hint:").yellow().bold(), msg);
}
