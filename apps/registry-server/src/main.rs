//! REST API server for the student registry.
//!
//! Wires the in-memory store to the HTTP API with configuration
//! parsing and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use registry_api::{router::Router, server::Server};
use registry_core::{RegistryConfig, StudentStore};
use tokio::signal;

/// Command-line arguments for the registry server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    // Create configuration
    let config = Arc::new(RegistryConfig {
        initial_capacity: 1024, // Default value
        request_timeout_ms: args.request_timeout_ms,
    });

    // Create store and router
    let store = Arc::new(StudentStore::with_capacity(config.initial_capacity));
    let router = Router::new(store, config);

    // Bind server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let server = Server::bind(addr, router).await?;

    println!("Starting student registry server...");
    println!("  Host: {}", args.host);
    println!("  Port: {}", args.port);
    println!("  Request timeout: {} ms", args.request_timeout_ms);

    // Start server with graceful shutdown
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    println!("\nShutting down server...");
    server_handle.abort();

    Ok(())
}
