//! Forward-auth gate for reverse proxy deployments.
//!
//! An HTTP endpoint consulted by a trusted reverse proxy (nginx
//! `auth_request`, Traefik forwardAuth) to decide whether the real client
//! behind the proxy chain may reach the protected service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Proxy subrequest           ┌──────────────────────────────────────────┐
//!   (X-Forwarded-For)          │                 GATE                     │
//!   ──────────────────────────▶│  ┌─────────┐   ┌───────┐   ┌──────────┐ │
//!                              │  │   net   │──▶│ http  │──▶│  auth    │ │
//!                              │  │listener │   │server │   │chain walk│ │
//!                              │  └─────────┘   └───────┘   └────┬─────┘ │
//!                              │                                 ▼       │
//!   200 / 403 / 500            │                           ┌──────────┐  │
//!   ◀──────────────────────────│                           │ resolver │──┼──▶ DNS
//!   (status only, empty body)  │                           │(per req) │  │
//!                              │                           └──────────┘  │
//!                              │  ┌────────────────────────────────────┐ │
//!                              │  │  config        lifecycle           │ │
//!                              │  │  (immutable)   (signals, drain)    │ │
//!                              │  └────────────────────────────────────┘ │
//!                              └──────────────────────────────────────────┘
//! ```
//!
//! Every decision is recomputed per request from the forwarding chain, the
//! immutable trusted-proxy set, and a fresh DNS resolution of the allowed
//! domains. Nothing is cached and nothing persists between requests.

// Core decision pipeline
pub mod auth;
pub mod resolver;

// Serving surface
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod cli;
pub mod config;
pub mod lifecycle;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
