//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and clap handle syntactic)
//! - Enforce listen-target exclusivity (port vs socket)
//! - Require a non-empty allow-list
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs once at startup; a failure is fatal, never deferred to request time

use crate::config::schema::GateConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Both a TCP port and a Unix socket were configured.
    ConflictingListenTargets,
    /// A bind IP was given without a TCP port.
    ListenIpWithoutPort,
    /// The allow-list is empty.
    NoAllowedDomains,
    /// An allow-list entry is blank.
    EmptyDomain,
    /// The DNS lookup timeout is zero.
    ZeroResolveTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ConflictingListenTargets => {
                write!(f, "socket and port are not specified at the same time")
            }
            ValidationError::ListenIpWithoutPort => {
                write!(f, "listen IP requires a port")
            }
            ValidationError::NoAllowedDomains => {
                write!(f, "at least one allowed domain must be specified")
            }
            ValidationError::EmptyDomain => {
                write!(f, "allowed domain must not be blank")
            }
            ValidationError::ZeroResolveTimeout => {
                write!(f, "resolve timeout must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every semantic error.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.socket.is_some() && config.listener.port.is_some() {
        errors.push(ValidationError::ConflictingListenTargets);
    }
    if config.listener.listen_ip.is_some() && config.listener.port.is_none() {
        errors.push(ValidationError::ListenIpWithoutPort);
    }

    if config.authorizer.allowed_domains.is_empty() {
        errors.push(ValidationError::NoAllowedDomains);
    } else if config
        .authorizer
        .allowed_domains
        .iter()
        .any(|d| d.trim().is_empty())
    {
        errors.push(ValidationError::EmptyDomain);
    }

    if config.authorizer.resolve_timeout_secs == 0 {
        errors.push(ValidationError::ZeroResolveTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
