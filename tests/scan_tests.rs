use pscan::output::Reporter;
use pscan::scanner::{run_scan, scan, ScanOptions, TcpConnectProbe};
use pscan::services::get_service_name;
use pscan::types::{PortRange, ScanTarget};
use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// A loopback port with nothing listening on it.
async fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port().min(65533)
}

fn range(start: u16, end: u16) -> PortRange {
    format!("{}-{}", start, end).parse().unwrap()
}

#[tokio::test]
async fn verbose_scan_of_closed_ports_reports_each_once() {
    let start = unused_port().await;
    let options = ScanOptions::new("127.0.0.1", range(start, start + 2), 500, 10, true).unwrap();
    let target = ScanTarget::new("127.0.0.1", LOCALHOST);
    let captured = Captured::default();

    let stats = scan(&options, &target, Reporter::new(captured.clone(), true))
        .await
        .unwrap();

    let lines = captured.lines();
    assert_eq!(
        lines.first().map(String::as_str),
        Some(format!("Starting port scan on 127.0.0.1 (ports {}-{})", start, start + 2).as_str())
    );
    assert_eq!(lines[1], "Using 10 threads with 500ms timeout");
    assert_eq!(lines.last().map(String::as_str), Some("Scan complete!"));

    let outcomes: Vec<&String> = lines.iter().filter(|l| l.starts_with("Port ")).collect();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(stats.probed, 3);
    // Only `start` is known to be free; the ports after it may be in use.
    assert!(outcomes
        .iter()
        .any(|l| **l == format!("Port {}/tcp closed (connection refused)", start)));
    for (offset, port) in (start..=start + 2).enumerate() {
        let prefix = format!("Port {}/tcp ", port);
        assert_eq!(
            outcomes.iter().filter(|l| l.starts_with(&prefix)).count(),
            1,
            "port at offset {} reported once",
            offset
        );
    }
}

#[tokio::test]
async fn quiet_scan_prints_only_open_ports() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let start = open.saturating_sub(2).max(1);
    let options = ScanOptions::new("127.0.0.1", range(start, open), 500, 100, false).unwrap();
    let captured = Captured::default();

    let probe = Arc::new(TcpConnectProbe::new(LOCALHOST, options.timeout(), false));
    let stats = run_scan(&options, probe, Reporter::new(captured.clone(), false)).await;

    assert!(stats.open >= 1);
    assert!(captured
        .lines()
        .contains(&format!("Port {}/tcp open", open)));
    drop(listener);
}

#[tokio::test]
async fn repeated_scans_agree() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port().min(65534);
    let options = ScanOptions::new("127.0.0.1", range(open, open + 1), 500, 2, false).unwrap();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let captured = Captured::default();
        let probe = Arc::new(TcpConnectProbe::new(LOCALHOST, Duration::from_millis(500), false));
        let stats = run_scan(&options, probe, Reporter::new(captured.clone(), false)).await;
        let mut lines = captured.lines();
        lines.sort();
        runs.push((stats, lines));
    }

    assert_eq!(runs[0], runs[1]);
    drop(listener);
}

/// Listen on the first free table port that needs no privileges.
async fn listen_on_known_port() -> (TcpListener, u16, &'static str) {
    for port in [8080, 3306, 5900, 3389, 1723] {
        if let Ok(listener) = TcpListener::bind(("127.0.0.1", port)).await {
            let service = get_service_name(port).unwrap();
            return (listener, port, service);
        }
    }
    panic!("all of 8080, 3306, 5900, 3389 and 1723 are in use on 127.0.0.1");
}

#[tokio::test]
async fn known_port_is_annotated_with_service() {
    let (listener, port, service) = listen_on_known_port().await;
    let options = ScanOptions::new("127.0.0.1", range(port - 1, port), 500, 100, false).unwrap();
    let captured = Captured::default();

    let probe = Arc::new(TcpConnectProbe::new(LOCALHOST, options.timeout(), false));
    run_scan(&options, probe, Reporter::new(captured.clone(), false)).await;

    let lines = captured.lines();
    let prefix = format!("Port {}/", port);
    assert_eq!(lines.iter().filter(|l| l.starts_with(&prefix)).count(), 1);
    assert!(lines.contains(&format!("Port {}/tcp open - {}", port, service)));
    drop(listener);
}

#[tokio::test]
#[ignore = "binding port 22 needs root and a host without sshd"]
async fn ssh_port_is_annotated() {
    let listener = TcpListener::bind("127.0.0.1:22").await.unwrap();
    let options = ScanOptions::new("127.0.0.1", range(21, 22), 500, 100, false).unwrap();
    let captured = Captured::default();

    let probe = Arc::new(TcpConnectProbe::new(LOCALHOST, options.timeout(), false));
    run_scan(&options, probe, Reporter::new(captured.clone(), false)).await;

    let lines = captured.lines();
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("Port 22/")).count(),
        1
    );
    assert!(lines.contains(&"Port 22/tcp open - SSH".to_string()));
    drop(listener);
}
