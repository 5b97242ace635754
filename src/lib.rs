//! # pscan - A Concurrent TCP Connect Port Scanner
//!
//! pscan attempts a TCP handshake against every port in a range, reports
//! each port as open, closed or filtered, names well-known services and can
//! grab a short banner from open ports.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use pscan::output::Reporter;
//! use pscan::scanner::{scan, ScanOptions};
//! use pscan::types::{PortRange, ScanTarget};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target = ScanTarget::resolve("127.0.0.1").await?;
//!     let range: PortRange = "1-1024".parse()?;
//!     let options = ScanOptions::new("127.0.0.1", range, 2000, 100, false)?;
//!
//!     scan(&options, &target, Reporter::stdout(options.verbose)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port ranges and resolved targets
//! - [`scanner`] - The `Probe` trait, the TCP connect probe and the batching engine
//! - [`banner`] - Banner capture on open connections
//! - [`services`] - Well-known port to service name table
//! - [`output`] - Serialized line output
//! - [`config`] - Settings file with scan defaults
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ProbeError, ResolutionError};
pub use scanner::{PortOutcome, PortStatus, Probe, ScanOptions};
pub use types::{Port, PortRange, ScanTarget};
