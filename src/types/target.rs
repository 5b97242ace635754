//! Target resolution.
//!
//! A target is either an IP literal, used as-is, or a hostname resolved
//! through DNS before any probing begins.

use std::fmt;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }

    /// Resolve a hostname or IP address string.
    ///
    /// Hostnames go through the system resolver configuration, falling back
    /// to the resolver defaults when none can be read. The first address
    /// returned is the one scanned.
    pub async fn resolve(target: &str) -> Result<Self, TargetError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(TargetError::Empty);
        }

        if let Ok(ip) = target.parse::<IpAddr>() {
            return Ok(Self::new(target, ip));
        }

        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            debug!(error = %e, "system resolver config unavailable, using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        let response = resolver
            .lookup_ip(target)
            .await
            .map_err(|e| TargetError::DnsResolutionFailed(target.to_string(), e.to_string()))?;

        let ip = response
            .iter()
            .next()
            .ok_or_else(|| TargetError::NoAddressesFound(target.to_string()))?;

        debug!(host = target, %ip, "resolved target");
        Ok(Self::new(target, ip))
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Error type for target resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("empty target")]
    Empty,
    #[error("failed to resolve host {0}: {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for host {0}")]
    NoAddressesFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let target = ScanTarget::resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.original, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_resolve_ipv6_literal() {
        let target = ScanTarget::resolve("::1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_empty_target() {
        assert!(matches!(
            ScanTarget::resolve("  ").await,
            Err(TargetError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_unresolvable_host() {
        // .invalid is reserved and never resolves.
        let result = ScanTarget::resolve("no-such-host.invalid").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_display_uses_original() {
        let target = ScanTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.to_string(), "localhost");
    }
}
