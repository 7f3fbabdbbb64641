use crate::error::NetworkError;
use crate::network::Transport;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;

/// Handle to one remote node. Immutable after construction.
#[derive(Clone)]
pub struct Peer {
    addr: SocketAddr,
    transport: Arc<dyn Transport>,
}

impl Peer {
    pub fn new(addr: SocketAddr, transport: Arc<dyn Transport>) -> Self {
        Self { addr, transport }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Delivers one encoded command to this peer over a fresh connection.
    /// A failure is returned to the caller and the command is permanently
    /// lost to this peer; there is no retry and no queue.
    pub async fn send(&self, payload: Bytes) -> Result<(), NetworkError> {
        self.transport.send(self.addr, payload).await
    }
}

impl std::fmt::Debug for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer").field("addr", &self.addr).finish()
    }
}
