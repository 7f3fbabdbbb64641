use crate::protocol::Command;
use crate::store::Store;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

/// One read call yields one logical message; peers write a single encoded
/// command per connection, so the buffer only has to hold one command.
const READ_BUFFER_SIZE: usize = 1024;

/// Accepts inbound replication connections and applies the commands they
/// carry to the local store.
pub struct ReplicaServer {
    name: String,
    store: Arc<Store>,
}

impl ReplicaServer {
    pub fn new(name: impl Into<String>, store: Arc<Store>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Accept loop over an already-bound listener. Binding is split out so
    /// callers can bind to port 0 and learn the local address first. One
    /// handler task is spawned per connection; the loop never waits for a
    /// handler to finish and applies no connection limit.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!(
            node = %self.name,
            "Listening on {}",
            listener.local_addr()?
        );

        loop {
            let (socket, peer_addr) = listener.accept().await?;
            tracing::debug!(
                node = %self.name,
                "Accepted connection from {}",
                peer_addr
            );

            let store = self.store.clone();
            let name = self.name.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(socket, store, &name).await {
                    tracing::error!(
                        node = %name,
                        "Error handling connection from {}: {}",
                        peer_addr,
                        e
                    );
                }
            });
        }
    }
}

/// Per-connection loop: read one message, decode, apply, repeat. An empty
/// read means the peer closed and ends the loop cleanly; a decode failure
/// ends this connection with an error but never touches the store.
/// Inbound commands are already-replicated data, so applying them must not
/// fan out again.
async fn handle_connection(
    mut socket: TcpStream,
    store: Arc<Store>,
    node: &str,
) -> anyhow::Result<()> {
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = socket.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }

        let command = Command::parse(&buffer[..bytes_read])?;
        tracing::debug!(node = %node, "Applying replicated {:?}", command);
        store.apply(command).await;
    }

    Ok(())
}
