//! Probe trait abstraction.
//!
//! The engine only knows how to dispatch probes and report their outcomes;
//! how a single port gets probed lives behind [`Probe`].

use crate::error::ProbeError;
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;

/// Status of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortStatus {
    /// Handshake completed.
    Open,
    /// Connection refused, or failed for a reason other than a timeout.
    Closed,
    /// No answer before the timeout.
    Filtered,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Filtered => write!(f, "filtered"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOutcome {
    /// The port that was probed.
    pub port: Port,
    /// Status determined by the probe.
    pub status: PortStatus,
    /// Well-known service name, only for open ports.
    pub service: Option<&'static str>,
    /// Banner captured from the service, only for open ports.
    pub banner: Option<String>,
    /// What went wrong, for ports that are not open.
    pub error: Option<ProbeError>,
}

impl PortOutcome {
    /// An open port.
    pub fn open(port: Port, service: Option<&'static str>) -> Self {
        Self {
            port,
            status: PortStatus::Open,
            service,
            banner: None,
            error: None,
        }
    }

    /// A port whose connection attempt failed.
    pub fn failed(port: Port, error: ProbeError) -> Self {
        let status = match error {
            ProbeError::Timeout => PortStatus::Filtered,
            ProbeError::Refused | ProbeError::Other(_) => PortStatus::Closed,
        };

        Self {
            port,
            status,
            service: None,
            banner: None,
            error: Some(error),
        }
    }

    /// Set the banner.
    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// A way of probing one port.
///
/// Implementations must always return an outcome; failures are folded into
/// the outcome's status rather than returned as errors.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe a single port.
    async fn probe(&self, port: Port) -> PortOutcome;
}
