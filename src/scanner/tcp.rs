//! TCP Connect probe implementation.
//!
//! Performs standard TCP connect probes using the operating system's
//! socket API. No elevated privileges are needed since the full handshake
//! is completed.

use crate::banner::grab_banner;
use crate::error::ProbeError;
use crate::scanner::traits::{PortOutcome, Probe};
use crate::services::get_service_name;
use crate::types::Port;
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP Connect probe.
///
/// One connection attempt per port, bounded by the connect timeout unless
/// that timeout is zero. When banner grabbing is on, the banner is read over
/// the same connection.
pub struct TcpConnectProbe {
    target: IpAddr,
    timeout: Duration,
    grab_banners: bool,
}

impl TcpConnectProbe {
    /// Create a new TCP connect probe.
    ///
    /// # Arguments
    /// * `target` - Target IP address to probe
    /// * `timeout` - Connection timeout per port
    /// * `grab_banners` - Whether to attempt banner grabbing on open ports
    pub fn new(target: IpAddr, timeout: Duration, grab_banners: bool) -> Self {
        Self {
            target,
            timeout,
            grab_banners,
        }
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> Result<TcpStream, ProbeError> {
        within_deadline(self.timeout, TcpStream::connect(addr)).await
    }
}

/// Run a connect attempt under `deadline`. A zero deadline means no limit.
async fn within_deadline<F, T>(deadline: Duration, attempt: F) -> Result<T, ProbeError>
where
    F: Future<Output = io::Result<T>>,
{
    if deadline.is_zero() {
        return attempt.await.map_err(|e| ProbeError::classify(&e));
    }

    match timeout(deadline, attempt).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ProbeError::classify(&e)),
        Err(_) => Err(ProbeError::Timeout),
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    async fn probe(&self, port: Port) -> PortOutcome {
        let port_num = port.as_u16();
        let addr = SocketAddr::new(self.target, port_num);

        match self.attempt_connect(addr).await {
            Ok(mut stream) => {
                let banner = if self.grab_banners {
                    grab_banner(&mut stream, port_num).await
                } else {
                    None
                };
                drop(stream);

                trace!(port = port_num, "open");
                PortOutcome::open(port, get_service_name(port_num)).with_banner(banner)
            }
            Err(e) => {
                trace!(port = port_num, error = %e, "not open");
                PortOutcome::failed(port, e)
            }
        }
    }
}
