//! Forwarding-chain parsing and trust-boundary walking.
//!
//! # Responsibilities
//! - Parse `X-Forwarded-For` into an ordered address chain
//! - Canonicalize every address before comparison
//! - Walk the chain nearest-hop-first past trusted proxies
//!
//! # Design Decisions
//! - Whole-chain strictness: one unparsable entry rejects the request,
//!   since a chain that cannot be fully parsed cannot be trusted at all
//! - The walk stops at the first untrusted entry; entries further left are
//!   attacker-controlled and never consulted for trust
//! - Comparison is on canonical `IpAddr` values, never on raw strings

use std::collections::HashSet;
use std::net::IpAddr;

/// Canonicalize an address for comparison.
///
/// IPv4-mapped IPv6 forms (`::ffff:a.b.c.d`) unwrap to plain IPv4 so that
/// header parsing and DNS resolution agree even when they produce different
/// textual forms of the same address.
pub fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

/// Set of proxy addresses whose chain entries are vouched for.
///
/// Fixed at startup, shared read-only across requests.
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies {
    addrs: HashSet<IpAddr>,
}

impl TrustedProxies {
    pub fn new(addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        Self {
            addrs: addrs.into_iter().map(canonical).collect(),
        }
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.addrs.contains(&canonical(ip))
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }
}

/// Why a chain could not produce a candidate client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainReject {
    /// Header absent or empty.
    Missing,
    /// This entry did not parse as an IP address.
    Malformed(String),
    /// Every hop was trusted; the walk exhausted the chain.
    AllTrusted,
}

/// Parse a forwarding header value into an ordered address chain.
///
/// Earliest hop first, nearest hop last, matching the order proxies append
/// in. Every entry must parse as an IP address.
pub fn parse_chain(header: &str) -> Result<Vec<IpAddr>, ChainReject> {
    if header.trim().is_empty() {
        return Err(ChainReject::Missing);
    }
    header
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<IpAddr>()
                .map(canonical)
                .map_err(|_| ChainReject::Malformed(entry.to_string()))
        })
        .collect()
}

/// Walk the chain and return the candidate client address.
///
/// Scans from the nearest hop backward: each proxy appends its observed
/// peer to the end of the header, so the rightmost untrusted entry is the
/// most reliable signal of the actual client. The scan stops there; it
/// never continues past the trust boundary.
pub fn resolve_client(
    header: Option<&str>,
    trusted: &TrustedProxies,
) -> Result<IpAddr, ChainReject> {
    let header = header.ok_or(ChainReject::Missing)?;
    let chain = parse_chain(header)?;
    chain
        .into_iter()
        .rev()
        .find(|ip| !trusted.contains(*ip))
        .ok_or(ChainReject::AllTrusted)
}
