//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Validated configuration
//!     → listener.rs (derive the listen target: TCP vs Unix socket)
//!     → bind
//!     → Hand off to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bind failures are startup errors; the process exits non-zero
//! - Exactly one listen target; exclusivity is enforced by validation

pub mod listener;

pub use listener::{GateListener, ListenTarget, ListenerError};
