//! Shared utilities for integration testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use forward_auth_gate::config::GateConfig;
use forward_auth_gate::http::HttpServer;
use forward_auth_gate::lifecycle::Shutdown;
use forward_auth_gate::net::GateListener;
use forward_auth_gate::resolver::{Resolve, ResolveError};

/// Deterministic resolver: fixed answers per domain, failures on demand.
#[derive(Default)]
pub struct StubResolver {
    answers: HashMap<String, Vec<IpAddr>>,
    failing: HashSet<String>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixed answer for a domain.
    pub fn with(mut self, domain: &str, addrs: &[&str]) -> Self {
        self.answers.insert(
            domain.to_string(),
            addrs.iter().map(|a| a.parse().unwrap()).collect(),
        );
        self
    }

    /// Make lookups for a domain fail.
    pub fn failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_string());
        self
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        if self.failing.contains(domain) {
            return Err(ResolveError::Lookup {
                domain: domain.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
            });
        }
        self.answers
            .get(domain)
            .cloned()
            .ok_or_else(|| ResolveError::Lookup {
                domain: domain.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such host"),
            })
    }
}

/// A gate server running on an ephemeral loopback port.
///
/// Holds the shutdown coordinator so the server drains when the test ends.
pub struct GateHandle {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

/// Start a gate with the given trusted proxies, allow-list, and resolver.
pub async fn start_gate(
    trusted: &[&str],
    domains: &[&str],
    resolver: Arc<dyn Resolve>,
) -> GateHandle {
    let mut config = GateConfig::default();
    config.trust.trusted_proxies = trusted.iter().map(|a| a.parse().unwrap()).collect();
    config.authorizer.allowed_domains = domains.iter().map(|d| d.to_string()).collect();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::with_resolver(config, resolver);

    tokio::spawn(async move {
        let _ = server.run(GateListener::Tcp(listener), server_shutdown).await;
    });

    GateHandle {
        addr,
        _shutdown: shutdown,
    }
}
