use crate::protocol::Command;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// The node's local key-value mapping. One instance per node; every read
/// and write goes through it, from the owning task and from every
/// connection handler concurrently.
#[derive(Debug, Default)]
pub struct Store {
    data: Mutex<HashMap<String, String>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key => value`.
    pub async fn insert(&self, key: String, value: String) {
        let mut data = self.data.lock().await;
        data.insert(key, value);
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let data = self.data.lock().await;
        data.get(key).cloned()
    }

    /// Removes `key`, returning the previous value if it was present.
    pub async fn remove(&self, key: &str) -> Option<String> {
        let mut data = self.data.lock().await;
        data.remove(key)
    }

    /// Applies an already-replicated inbound command. Never triggers
    /// further replication.
    pub async fn apply(&self, command: Command) {
        let mut data = self.data.lock().await;
        match command {
            Command::Put { key, value } => {
                data.insert(key, value);
            }
            Command::Delete { key } => {
                data.remove(&key);
            }
        }
    }

    pub async fn len(&self) -> usize {
        let data = self.data.lock().await;
        data.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
