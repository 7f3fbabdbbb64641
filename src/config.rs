use std::net::SocketAddr;
use std::time::Duration;

/// How long one outbound replication send may spend connecting, and again
/// how long it may spend writing, before the attempt is abandoned. An
/// unbounded send would hang forever on a dead peer.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_millis(1000);

/// Node configuration, supplied once at startup and immutable afterwards.
///
/// The peer list is taken as-is: duplicates and self-references are not
/// filtered, and configuring a node as its own peer is undefined behavior.
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub bind_addr: SocketAddr,
    pub peers: Vec<SocketAddr>,
    pub send_timeout: Duration,
}

impl Config {
    pub fn new(
        name: impl Into<String>,
        bind_addr: SocketAddr,
        peers: Vec<SocketAddr>,
    ) -> Self {
        Self {
            name: name.into(),
            bind_addr,
            peers,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}
