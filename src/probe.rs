//! Single-endpoint TCP reachability probe

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::Endpoint;

/// Attempt one TCP connection to `endpoint`.
///
/// Returns true if the connection establishes within `connect_timeout`,
/// false on any socket error or on timeout. The stream is dropped on every
/// path, so the socket is always released.
pub async fn probe(endpoint: Endpoint, connect_timeout: Duration) -> bool {
    tracing::debug!("Probing {} (timeout {:?})", endpoint, connect_timeout);
    match timeout(
        connect_timeout,
        TcpStream::connect((endpoint.host, endpoint.port)),
    )
    .await
    {
        Ok(Ok(_stream)) => {
            tracing::debug!("Probe {}: OK", endpoint);
            true
        }
        Ok(Err(err)) => {
            tracing::warn!("Socket error for {}: {}", endpoint, err);
            false
        }
        Err(_) => {
            tracing::warn!("Connect to {} timed out after {:?}", endpoint, connect_timeout);
            false
        }
    }
}
