use crate::config::Config;
use crate::network::{TcpTransport, Transport};
use crate::peer::Peer;
use crate::protocol::Command;
use crate::replicator::Replicator;
use crate::store::Store;
use std::sync::Arc;

/// One participant in the mesh: the local store plus the fixed peer list.
///
/// All state is instance state so several nodes can live in one process.
/// `put`/`get`/`delete` are the whole client surface; there is no remote
/// client protocol distinct from the inter-node one.
pub struct Node {
    name: String,
    store: Arc<Store>,
    replicator: Replicator,
}

impl Node {
    pub fn new(config: Config) -> Self {
        let transport: Arc<dyn Transport> =
            Arc::new(TcpTransport::new(config.send_timeout));
        let peers = config
            .peers
            .iter()
            .map(|addr| Peer::new(*addr, transport.clone()))
            .collect();
        Self::with_peers(config.name, peers)
    }

    /// Builds a node over explicit peer handles; tests inject in-memory
    /// transports here.
    pub fn with_peers(name: impl Into<String>, peers: Vec<Peer>) -> Self {
        Self {
            name: name.into(),
            store: Arc::new(Store::new()),
            replicator: Replicator::new(peers),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared store, for wiring into a [`crate::server::ReplicaServer`].
    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    /// Inserts or overwrites locally, then replicates to every peer. The
    /// local write has committed before any send is attempted, and it
    /// never fails because of replication.
    pub async fn put(&self, key: String, value: String) {
        self.store.insert(key.clone(), value.clone()).await;
        tracing::info!(node = %self.name, "Stored: {} => {}", key, value);
        self.replicate(Command::Put { key, value }).await;
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.store.get(key).await
    }

    /// Removes the key if present and replicates the delete. Deleting an
    /// absent key changes nothing and sends nothing.
    pub async fn delete(&self, key: &str) {
        if self.store.remove(key).await.is_some() {
            tracing::info!(node = %self.name, "Deleted: {}", key);
            self.replicate(Command::Delete {
                key: key.to_string(),
            })
            .await;
        }
    }

    async fn replicate(&self, command: Command) {
        for outcome in self.replicator.replicate(&command).await {
            if let Err(e) = outcome.result {
                tracing::warn!(
                    node = %self.name,
                    "Replication to {} failed: {}",
                    outcome.peer,
                    e
                );
            }
        }
    }
}
