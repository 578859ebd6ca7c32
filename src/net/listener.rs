//! Listen-target derivation and binding.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;
use tokio::net::{TcpListener, UnixListener};

use crate::config::ListenerConfig;

/// Where the gate listens, resolved from validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    Tcp(SocketAddr),
    Unix(PathBuf),
}

impl ListenTarget {
    /// TCP port used when neither a socket nor a port is configured.
    pub const DEFAULT_PORT: u16 = 80;

    /// Derive the listen target. Assumes the config already passed
    /// validation, so `socket` and `port` are never both set.
    pub fn from_config(config: &ListenerConfig) -> Self {
        match &config.socket {
            Some(path) => ListenTarget::Unix(path.clone()),
            None => {
                let ip = config
                    .listen_ip
                    .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
                let port = config.port.unwrap_or(Self::DEFAULT_PORT);
                ListenTarget::Tcp(SocketAddr::new(ip, port))
            }
        }
    }
}

impl std::fmt::Display for ListenTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenTarget::Tcp(addr) => write!(f, "tcp://{}", addr),
            ListenTarget::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {target}: {source}")]
    Bind {
        target: String,
        source: std::io::Error,
    },
}

/// A bound listener, TCP or Unix domain socket.
pub enum GateListener {
    Tcp(TcpListener),
    Unix(UnixListener),
}

impl GateListener {
    /// Bind the configured listen target.
    pub async fn bind(target: &ListenTarget) -> Result<Self, ListenerError> {
        match target {
            ListenTarget::Tcp(addr) => {
                let listener = TcpListener::bind(addr).await.map_err(|source| {
                    ListenerError::Bind {
                        target: target.to_string(),
                        source,
                    }
                })?;
                let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
                    target: target.to_string(),
                    source,
                })?;
                tracing::info!(address = %local_addr, "listener bound");
                Ok(GateListener::Tcp(listener))
            }
            ListenTarget::Unix(path) => {
                let listener = UnixListener::bind(path).map_err(|source| ListenerError::Bind {
                    target: target.to_string(),
                    source,
                })?;
                tracing::info!(socket = %path.display(), "listener bound");
                Ok(GateListener::Unix(listener))
            }
        }
    }
}
