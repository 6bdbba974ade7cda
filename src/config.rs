//! Fixed defaults and the immutable runtime configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default path of the append-only outage log
pub const DEFAULT_LOG_PATH: &str = "output.log";

/// Default per-probe TCP connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 1;

/// Default number of probe attempts per reachability check
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default sleep after an "up" iteration, in seconds
pub const DEFAULT_UP_INTERVAL_SECS: u64 = 2;

/// Default sleep after a "down" iteration, in seconds
pub const DEFAULT_DOWN_INTERVAL_SECS: u64 = 2;

/// A probe target: host and TCP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub host: &'static str,
    pub port: u16,
}

impl Endpoint {
    pub const fn new(host: &'static str, port: u16) -> Self {
        Self { host, port }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Pool of public, highly-available DNS services probed for reachability.
pub const SERVERS: &[Endpoint] = &[
    Endpoint::new("8.8.8.8", 53),         // Google DNS
    Endpoint::new("8.8.4.4", 53),         // Alt. Google DNS
    Endpoint::new("91.239.100.100", 53),  // uncensoreddns.org
    Endpoint::new("89.233.43.71", 53),    // uncensoreddns.org
    Endpoint::new("84.200.69.80", 53),    // dns.watch
    Endpoint::new("84.200.70.40", 53),    // dns.watch
    Endpoint::new("208.67.222.222", 53),  // OpenDNS
    Endpoint::new("208.67.220.220", 53),  // OpenDNS
    Endpoint::new("199.85.126.10", 53),   // Norton ConnectSafe
    Endpoint::new("199.85.127.10", 53),   // Norton ConnectSafe
    Endpoint::new("199.85.126.20", 53),   // Norton ConnectSafe
    Endpoint::new("199.85.127.20", 53),   // Norton ConnectSafe
    Endpoint::new("199.85.126.30", 53),   // Norton ConnectSafe
    Endpoint::new("199.85.127.30", 53),   // Norton ConnectSafe
];

/// Immutable runtime configuration, built once in `main` and passed to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub servers: &'static [Endpoint],
    pub connect_timeout: Duration,
    pub max_retries: u32,
    pub up_interval: Duration,
    pub down_interval: Duration,
    pub log_path: PathBuf,
}
