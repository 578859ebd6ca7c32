//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (any method, any path)
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → auth::evaluate (chain walk + allow-list check)
//!     → status-only response: 200 / 403 / 500, empty body
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
