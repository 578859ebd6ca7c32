//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags ─┐
//!            ├─▶ schema.rs (GateConfig) ─▶ validation.rs ─▶ accepted
//! TOML file ─┘        (loader.rs)
//! ```
//!
//! # Design Decisions
//! - Syntactic validation happens at parse time: clap and serde both parse
//!   proxy addresses as `IpAddr`, so an invalid entry never reaches runtime
//! - Semantic validation is a pure function returning all errors at once
//! - Configuration is immutable after startup; request handlers receive it
//!   behind `Arc` and never lock

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AuthorizerConfig, GateConfig, ListenerConfig, TimeoutConfig, TrustConfig};
pub use validation::{validate_config, ValidationError};
