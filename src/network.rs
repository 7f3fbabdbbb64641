use crate::error::NetworkError;
use async_trait::async_trait;
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Outbound transport for replication messages.
///
/// The replicator only ever needs "deliver these bytes to that address
/// once"; keeping that behind a trait lets tests swap the real TCP
/// transport for an in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        addr: SocketAddr,
        payload: Bytes,
    ) -> Result<(), NetworkError>;
}

/// One fresh TCP connection per send: connect, write the full payload,
/// close. No pooling, no reuse, no retry. Connect and write are each
/// bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    send_timeout: Duration,
}

impl TcpTransport {
    pub fn new(send_timeout: Duration) -> Self {
        Self { send_timeout }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(
        &self,
        addr: SocketAddr,
        payload: Bytes,
    ) -> Result<(), NetworkError> {
        let mut stream =
            tokio::time::timeout(self.send_timeout, TcpStream::connect(addr))
                .await
                .map_err(|_| NetworkError::Timeout(self.send_timeout))?
                .map_err(|e| {
                    NetworkError::ConnectionFailed(format!(
                        "Failed to connect to {}: {}",
                        addr, e
                    ))
                })?;

        let write = async {
            stream.write_all(&payload).await?;
            stream.shutdown().await
        };
        tokio::time::timeout(self.send_timeout, write)
            .await
            .map_err(|_| NetworkError::Timeout(self.send_timeout))?
            .map_err(|e: std::io::Error| {
                NetworkError::WriteFailed(format!(
                    "Failed to write to {}: {}",
                    addr, e
                ))
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_send_delivers_full_payload() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let received = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            socket.read_to_end(&mut buf).await.unwrap();
            buf
        });

        let transport = TcpTransport::new(Duration::from_millis(1000));
        transport
            .send(addr, Bytes::from_static(b"PUT x 1"))
            .await?;

        assert_eq!(received.await?, b"PUT x 1");
        Ok(())
    }

    #[tokio::test]
    async fn test_send_to_unreachable_peer_fails() -> anyhow::Result<()> {
        // Bind and immediately drop so the port is known to be closed.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let transport = TcpTransport::new(Duration::from_millis(200));
        let result = transport.send(addr, Bytes::from_static(b"PUT x 1")).await;

        assert!(result.is_err());
        Ok(())
    }
}
