//! Command-line interface.
//!
//! Flags mirror the deployment surface: a listen target, the trusted-proxy
//! set, and the allowed domains as trailing positionals. A TOML config file
//! may supply any of these; flags given on the command line win.

use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::{loader, validate_config, ConfigError, GateConfig};

#[derive(Parser, Debug)]
#[command(name = "forward-auth-gate")]
#[command(about = "Reverse-proxy access gate: allow clients whose address \
                   resolves from an allow-listed domain", long_about = None)]
pub struct Cli {
    /// Unix domain socket to listen on (mutually exclusive with --port)
    #[arg(short, long, value_name = "PATH")]
    pub socket: Option<PathBuf>,

    /// TCP port to listen on (mutually exclusive with --socket)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// IP to bind the TCP listener to (requires --port)
    #[arg(long, value_name = "IP")]
    pub listen_ip: Option<IpAddr>,

    /// Trusted proxy address; repeat for each proxy
    #[arg(long = "trusted-proxy", value_name = "IP")]
    pub trusted_proxies: Vec<IpAddr>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allowed domains, checked in order (first match wins)
    #[arg(value_name = "DOMAIN")]
    pub allowed_domains: Vec<String>,
}

impl Cli {
    /// Merge the config file (if any) with command-line flags and validate.
    pub fn into_config(self) -> Result<GateConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => loader::load_config(path)?,
            None => GateConfig::default(),
        };

        if self.socket.is_some() {
            config.listener.socket = self.socket;
        }
        if self.port.is_some() {
            config.listener.port = self.port;
        }
        if self.listen_ip.is_some() {
            config.listener.listen_ip = self.listen_ip;
        }
        if !self.trusted_proxies.is_empty() {
            config.trust.trusted_proxies = self.trusted_proxies;
        }
        if !self.allowed_domains.is_empty() {
            config.authorizer.allowed_domains = self.allowed_domains;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
