//! Binary entrypoint: parse flags, bind the listener, serve until a
//! termination signal, then drain and exit.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forward_auth_gate::cli::Cli;
use forward_auth_gate::http::HttpServer;
use forward_auth_gate::lifecycle::{signals, Shutdown};
use forward_auth_gate::net::{GateListener, ListenTarget};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forward_auth_gate=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(error) => {
            // Configuration errors are fatal at startup, never deferred.
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let target = ListenTarget::from_config(&config.listener);
    tracing::info!(
        target = %target,
        trusted_proxies = config.trust.trusted_proxies.len(),
        allowed_domains = config.authorizer.allowed_domains.len(),
        "configuration loaded"
    );

    let listener = GateListener::bind(&target).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(error) = signals::wait_for_termination().await {
            tracing::error!(error = %error, "signal handler failed");
        }
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
