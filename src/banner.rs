//! Banner grabbing functionality for TCP connections.
//!
//! Reads the first chunk a service sends after the handshake. Services that
//! wait for the client to speak first get a minimal HTTP request.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Read deadline for banner grabbing, independent of the connect timeout.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(1);

/// Longest banner kept, in characters, before the ellipsis.
const MAX_BANNER_LEN: usize = 80;

/// Probe sent to services that do not speak first.
const HTTP_PROBE: &[u8] = b"HEAD / HTTP/1.0\r\n\r\n";

/// Grab a banner from an open TCP stream.
///
/// Returns `None` if nothing printable arrives before [`BANNER_TIMEOUT`],
/// or if the read fails.
pub async fn grab_banner(stream: &mut TcpStream, port: u16) -> Option<String> {
    grab_banner_within(stream, port, BANNER_TIMEOUT).await
}

pub(crate) async fn grab_banner_within(
    stream: &mut TcpStream,
    port: u16,
    deadline: Duration,
) -> Option<String> {
    let exchange = async {
        if is_http_port(port) {
            stream.write_all(HTTP_PROBE).await?;
        }
        let mut buffer = vec![0u8; MAX_BANNER_SIZE];
        let n = stream.read(&mut buffer).await?;
        buffer.truncate(n);
        Ok::<_, std::io::Error>(buffer)
    };

    match timeout(deadline, exchange).await {
        Ok(Ok(data)) => clean_banner(&data),
        _ => None,
    }
}

/// Check if a port hosts a service that waits for the client.
fn is_http_port(port: u16) -> bool {
    matches!(port, 80 | 443 | 8080)
}

/// Keep the first trimmed line, bounded to [`MAX_BANNER_LEN`] characters.
fn clean_banner(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data);
    let line = text.trim().split('\n').next().unwrap_or_default().trim();
    if line.is_empty() {
        return None;
    }

    if line.chars().count() > MAX_BANNER_LEN {
        let cut: String = line.chars().take(MAX_BANNER_LEN).collect();
        Some(format!("{}...", cut))
    } else {
        Some(line.to_string())
    }
}
