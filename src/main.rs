//! CLI entry point for the bookshelf tool.

use anyhow::Result;

mod app;
mod app_config;
mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    app::runtime::run_bookshelf().await
}
