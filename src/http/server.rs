//! HTTP server setup and response mapping.
//!
//! # Responsibilities
//! - Create the Axum Router with a single method-agnostic handler
//! - Wire up middleware (tracing, request timeout)
//! - Map decisions to status codes: 200 allow, 403 deny, 500 server error
//! - Serve on TCP or a Unix socket with graceful shutdown
//!
//! # Design Decisions
//! - Responses carry a status code and an empty body; the consulting proxy
//!   only inspects the status
//! - The request timeout layer also bounds DNS wall-clock time, so a stuck
//!   resolver cannot stall a request past the deadline
//! - Config is split into `Arc`ed read-only pieces at startup; handlers
//!   never lock

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{self, Decision, DenyReason, TrustedProxies};
use crate::config::GateConfig;
use crate::net::GateListener;
use crate::resolver::{Resolve, SystemResolver};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub trusted: Arc<TrustedProxies>,
    pub domains: Arc<Vec<String>>,
    pub resolver: Arc<dyn Resolve>,
}

/// HTTP server for the gate.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server using the system resolver.
    pub fn new(config: GateConfig) -> Self {
        let resolver = Arc::new(SystemResolver::new(Duration::from_secs(
            config.authorizer.resolve_timeout_secs,
        )));
        Self::with_resolver(config, resolver)
    }

    /// Create a server with an explicit resolver (tests inject stubs here).
    pub fn with_resolver(config: GateConfig, resolver: Arc<dyn Resolve>) -> Self {
        let state = AppState {
            trusted: Arc::new(TrustedProxies::new(
                config.trust.trusted_proxies.iter().copied(),
            )),
            domains: Arc::new(config.authorizer.allowed_domains.clone()),
            resolver,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GateConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gate_handler))
            .route("/", any(gate_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires, then drain.
    pub async fn run(
        self,
        listener: GateListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        match listener {
            GateListener::Tcp(listener) => {
                tracing::info!(address = %listener.local_addr()?, "HTTP server starting");
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(wait_for_shutdown(shutdown))
                    .await?;
            }
            GateListener::Unix(listener) => {
                tracing::info!("HTTP server starting on Unix socket");
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(wait_for_shutdown(shutdown))
                    .await?;
            }
        }
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    // Err means every sender is gone; treat that as shutdown too.
    let _ = shutdown.recv().await;
    tracing::info!("shutdown signal received, draining in-flight requests");
}

/// Single gate handler: evaluate the forwarding chain and answer with a
/// bare status code.
async fn gate_handler(State(state): State<AppState>, request: Request<Body>) -> StatusCode {
    // A non-UTF-8 header value is treated like an absent chain; both deny.
    let header = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());

    let decision =
        auth::evaluate(header, &state.trusted, &state.domains, state.resolver.as_ref()).await;

    match &decision {
        Decision::Allow { client, domain } => {
            tracing::info!(client = %client, domain = %domain, "request allowed");
        }
        Decision::Deny(DenyReason::MissingChain) => {
            tracing::info!("request denied: no forwarding chain");
        }
        Decision::Deny(DenyReason::MalformedChain(entry)) => {
            tracing::info!(entry = %entry, "request denied: malformed chain entry");
        }
        Decision::Deny(DenyReason::NoMatch(client)) => {
            tracing::info!(client = %client, "request denied: no allowed domain matches");
        }
        Decision::AllTrusted => {
            tracing::warn!("every hop in the chain is trusted; check the trusted-proxy set");
        }
        Decision::ResolveFailed(error) => {
            tracing::error!(error = %error, "allow-list resolution failed");
        }
    }

    status_for(&decision)
}

/// Terminal status mapping.
fn status_for(decision: &Decision) -> StatusCode {
    match decision {
        Decision::Allow { .. } => StatusCode::OK,
        Decision::Deny(_) => StatusCode::FORBIDDEN,
        Decision::AllTrusted | Decision::ResolveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveError;
    use std::net::IpAddr;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let allow = Decision::Allow {
            client: ip("192.0.2.10"),
            domain: "app.example.org".into(),
        };
        assert_eq!(status_for(&allow), StatusCode::OK);

        assert_eq!(
            status_for(&Decision::Deny(DenyReason::MissingChain)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&Decision::Deny(DenyReason::MalformedChain("x".into()))),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&Decision::Deny(DenyReason::NoMatch(ip("192.0.2.10")))),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&Decision::AllTrusted),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let failed = Decision::ResolveFailed(ResolveError::Timeout {
            domain: "app.example.org".into(),
            timeout: Duration::from_secs(5),
        });
        assert_eq!(status_for(&failed), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
