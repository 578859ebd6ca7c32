//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT/SIGHUP → trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     Broadcast trigger → stop accepting → drain in-flight → exit
//! ```
//!
//! # Design Decisions
//! - No state to flush on exit: every decision is request-scoped
//! - Drain is bounded by the per-request timeout layer, so shutdown
//!   completes within one request deadline of the signal

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
