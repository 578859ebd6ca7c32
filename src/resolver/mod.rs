//! DNS resolution behind a narrow async interface.
//!
//! # Responsibilities
//! - Resolve a domain to its current address set
//! - Bound every lookup with a timeout
//!
//! # Design Decisions
//! - The [`Resolve`] trait decouples authorization logic from the network,
//!   so tests substitute a deterministic stub
//! - Answers are never cached; every request resolves afresh
//! - `tokio::net::lookup_host` delegates to the system resolver, which
//!   keeps `/etc/hosts` and `nsswitch` semantics intact

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

/// Error type for DNS resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("lookup for {domain} failed: {source}")]
    Lookup {
        domain: String,
        source: std::io::Error,
    },

    #[error("lookup for {domain} timed out after {timeout:?}")]
    Timeout { domain: String, timeout: Duration },
}

/// Forward DNS resolution.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve a domain to its current set of addresses.
    async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError>;
}

/// Resolver backed by the operating system via `tokio::net::lookup_host`.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Resolve for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        // lookup_host wants a host:port pair; the port is discarded.
        let lookup = tokio::net::lookup_host((domain, 0u16));
        let addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ResolveError::Timeout {
                domain: domain.to_string(),
                timeout: self.timeout,
            })?
            .map_err(|source| ResolveError::Lookup {
                domain: domain.to_string(),
                source,
            })?;
        Ok(addrs.map(|sock| sock.ip()).collect())
    }
}
