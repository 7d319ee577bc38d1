//! Reachability probe.
//!
//! A single connection attempt against a [`ListenAddress`]. The connection is
//! closed as soon as it is established; only the fact that it could be opened
//! matters.

use tokio::net::{TcpStream, UnixStream};

use super::address::{ListenAddress, Transport};

/// Attempt one connection to `target`.
pub async fn probe(target: &ListenAddress) -> std::io::Result<()> {
    let dial = target.dial_address();
    match target.transport() {
        Transport::Tcp => {
            let stream = TcpStream::connect(dial.as_str()).await?;
            drop(stream);
        }
        Transport::Unix => {
            let stream = UnixStream::connect(dial.as_str()).await?;
            drop(stream);
        }
    }

    tracing::trace!(target = %target, "Probe connection established");
    Ok(())
}
