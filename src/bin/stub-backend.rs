//! Always-200 stub backend.
//!
//! Stands in for the protected service in deployment smoke tests: whatever
//! the gate lets through lands here and gets an empty 200 back.

use axum::{http::StatusCode, routing::any, Router};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "stub-backend")]
#[command(about = "Always-200 stub backend for gate smoke tests", long_about = None)]
struct Cli {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let app = Router::new()
        .route("/", any(|| async { StatusCode::OK }))
        .route("/{*path}", any(|| async { StatusCode::OK }));

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("stub backend listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
