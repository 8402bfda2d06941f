//! Serve command handler: HTTP API plus the static frontend.

use anyhow::{Context, Result};
use bookshelf_core::api::{AppState, build_router};
use bookshelf_core::catalog::Catalog;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::ServeArgs;

pub async fn run_serve_command(catalog: Catalog, args: &ServeArgs) -> Result<()> {
    let static_dir = if args.static_dir.is_dir() {
        Some(args.static_dir.clone())
    } else {
        warn!(
            static_dir = %args.static_dir.display(),
            "Static directory not found; serving the API only"
        );
        None
    };

    let router = build_router(AppState::new(catalog), static_dir);

    let listener = TcpListener::bind((args.bind.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to listen on {}:{}", args.bind, args.port))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to read the listening address")?;
    info!(address = %local_addr, "Listening on http://{local_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "Failed to listen for Ctrl-C; stop the process to exit");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
