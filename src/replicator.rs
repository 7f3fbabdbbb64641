use crate::error::NetworkError;
use crate::peer::Peer;
use crate::protocol::Command;
use std::net::SocketAddr;
use tokio::task::JoinSet;

/// The result of one replication attempt to one peer. The local mutation
/// has already committed by the time these exist; the caller can log or
/// count failures but cannot fail the mutation.
#[derive(Debug)]
pub struct PeerOutcome {
    pub peer: SocketAddr,
    pub result: Result<(), NetworkError>,
}

/// Fans a mutation out to every configured peer.
pub struct Replicator {
    peers: Vec<Peer>,
}

impl Replicator {
    pub fn new(peers: Vec<Peer>) -> Self {
        Self { peers }
    }

    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    /// Encodes the command once and sends it to every peer concurrently.
    /// One peer failing, hanging, or being unreachable never prevents the
    /// attempts to the others. All attempts are awaited before returning;
    /// completion order is not delivery order.
    pub async fn replicate(&self, command: &Command) -> Vec<PeerOutcome> {
        let payload = command.encode();

        let mut tasks = JoinSet::new();
        for peer in &self.peers {
            let peer = peer.clone();
            let payload = payload.clone();
            tasks.spawn(async move {
                let result = peer.send(payload).await;
                PeerOutcome {
                    peer: peer.addr(),
                    result,
                }
            });
        }

        let mut outcomes = Vec::with_capacity(self.peers.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Replication task failed to join: {}", e)
                }
            }
        }
        outcomes
    }
}
