//! Authorization subsystem: the gate's decision pipeline.
//!
//! # Data Flow
//! ```text
//! X-Forwarded-For header
//!     → chain.rs (parse, canonicalize, walk past trusted hops)
//!     → authorizer.rs (resolve allow-list domains, first match wins)
//!     → Decision (Allow / Deny / server error)
//! ```
//!
//! # Design Decisions
//! - The pipeline is a pure function of (header, trusted set, resolver
//!   answers); no state survives a request
//! - Malformed input is a denial, never a server error: the untrusted hop
//!   controls the header and a parse failure must not become a trust signal
//! - An exhausted all-trusted chain and a failed lookup are server errors:
//!   both are operator-fixable, neither is a verdict about the client

pub mod authorizer;
pub mod chain;

pub use authorizer::{authorize, Authorization};
pub use chain::{canonical, resolve_client, ChainReject, TrustedProxies};

use std::net::IpAddr;

use crate::resolver::{Resolve, ResolveError};

/// Terminal decision for one request.
#[derive(Debug)]
pub enum Decision {
    /// The candidate client appeared in `domain`'s current resolution.
    Allow { client: IpAddr, domain: String },
    /// The request is forbidden.
    Deny(DenyReason),
    /// Every hop in the chain was trusted; the trust configuration cannot
    /// name a client.
    AllTrusted,
    /// A DNS lookup failed before a verdict was reached.
    ResolveFailed(ResolveError),
}

/// Why a request was forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No forwarding header, or an empty one.
    MissingChain,
    /// A chain entry did not parse as an IP address.
    MalformedChain(String),
    /// No allowed domain currently resolves to the candidate.
    NoMatch(IpAddr),
}

/// Evaluate one request end to end.
///
/// Walks the forwarding chain past trusted hops, then checks the candidate
/// against the allow-list. The decision depends only on the arguments and
/// the resolver's current answers.
pub async fn evaluate(
    header: Option<&str>,
    trusted: &TrustedProxies,
    domains: &[String],
    resolver: &dyn Resolve,
) -> Decision {
    let candidate = match chain::resolve_client(header, trusted) {
        Ok(ip) => ip,
        Err(ChainReject::Missing) => return Decision::Deny(DenyReason::MissingChain),
        Err(ChainReject::Malformed(entry)) => {
            return Decision::Deny(DenyReason::MalformedChain(entry))
        }
        Err(ChainReject::AllTrusted) => return Decision::AllTrusted,
    };

    match authorizer::authorize(candidate, domains, resolver).await {
        Ok(Authorization::Allowed { domain }) => Decision::Allow {
            client: candidate,
            domain,
        },
        Ok(Authorization::Denied) => Decision::Deny(DenyReason::NoMatch(candidate)),
        Err(error) => Decision::ResolveFailed(error),
    }
}
