//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same structure deserializes from a
//! TOML file and assembles from CLI flags.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration for the gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (TCP port or Unix socket).
    pub listener: ListenerConfig,

    /// Trusted proxy addresses.
    pub trust: TrustConfig,

    /// Allow-list and resolution settings.
    pub authorizer: AuthorizerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
///
/// Exactly one listen target: a TCP port (with optional bind IP) or a Unix
/// domain socket path. Neither given means TCP on the default port.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ListenerConfig {
    /// TCP port to listen on. Mutually exclusive with `socket`.
    pub port: Option<u16>,

    /// IP to bind the TCP listener to. Requires `port`.
    pub listen_ip: Option<IpAddr>,

    /// Unix domain socket path. Mutually exclusive with `port`.
    pub socket: Option<PathBuf>,
}

/// Trusted proxy set configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrustConfig {
    /// Addresses whose forwarding-chain entries are vouched for.
    /// Parsed as IPs at configuration time; order is irrelevant.
    pub trusted_proxies: Vec<IpAddr>,
}

/// Allow-list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorizerConfig {
    /// Domains whose current DNS resolution defines the allowed clients.
    /// Checked in this order; the first match wins.
    pub allowed_domains: Vec<String>,

    /// Upper bound on a single DNS lookup.
    pub resolve_timeout_secs: u64,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            resolve_timeout_secs: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request deadline, DNS lookups included.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}
