//! Allow-list authorization against live DNS.
//!
//! # Responsibilities
//! - Resolve each allowed domain in configured order
//! - Compare the candidate against resolved sets on canonical form
//! - Short-circuit on the first match
//!
//! # Design Decisions
//! - Fail-closed: one domain's lookup failure aborts the whole attempt
//!   rather than skipping to the next domain, so a resolver outage is
//!   never indistinguishable from a legitimate denial
//! - No caching: DNS answers change, and a stale allow is a security hole

use std::net::IpAddr;

use crate::auth::chain::canonical;
use crate::resolver::{Resolve, ResolveError};

/// Outcome of checking one candidate against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The candidate appeared in this domain's resolved set.
    Allowed { domain: String },
    /// No allowed domain currently resolves to the candidate.
    Denied,
}

/// Check the candidate against each allowed domain in configured order.
///
/// The first domain whose resolution contains the candidate wins and no
/// further domains are queried. A lookup failure anywhere aborts the whole
/// attempt, even if a later domain would have matched.
pub async fn authorize(
    candidate: IpAddr,
    domains: &[String],
    resolver: &dyn Resolve,
) -> Result<Authorization, ResolveError> {
    for domain in domains {
        let resolved = resolver.resolve(domain).await?;
        if resolved.into_iter().map(canonical).any(|ip| ip == candidate) {
            return Ok(Authorization::Allowed {
                domain: domain.clone(),
            });
        }
        tracing::trace!(client = %candidate, domain = %domain, "no match, trying next domain");
    }
    Ok(Authorization::Denied)
}
