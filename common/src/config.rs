use core::fmt;
use std::time::Duration;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// A seed node contact point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    pub address: String,
    pub port: u16,
}

impl Host {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Connection settings for [`crate::Client`].
///
/// `timeout` bounds every single step: the TCP connect, and each
/// request/reply exchange with a node.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub hosts: Vec<Host>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(hosts: Vec<Host>) -> Self {
        Self {
            hosts,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(vec![Host::new(DEFAULT_ADDRESS, DEFAULT_PORT)])
    }
}
