use std::sync::Arc;

use anyhow::{Context, Result};
use bookshelf_core::catalog::Catalog;
use bookshelf_core::provider::GoogleBooksProvider;
use bookshelf_core::store::JsonFileStore;
use tracing::{debug, info, warn};

use crate::app::{config_runtime, terminal};
use crate::app_config::load_default_file_config;
use crate::cli::Command;
use crate::commands;

pub(crate) async fn run_bookshelf() -> Result<()> {
    let (cli, cli_sources) = config_runtime::parse_cli_with_sources();

    let loaded_config = load_default_file_config()?;
    let resolved =
        config_runtime::apply_config_defaults(cli, &cli_sources, loaded_config.config.as_ref());

    terminal::init_tracing(resolved.log_level);
    debug!(
        config_path = ?loaded_config.path,
        config_loaded = loaded_config.config.is_some(),
        "Configuration resolved"
    );
    info!(data_file = %resolved.cli.data_file.display(), "Bookshelf starting");

    let provider = GoogleBooksProvider::new(resolved.cli.api_key.clone(), resolved.lookup_timeout)
        .context("Failed to build the metadata client")?;
    if !provider.has_api_key() && command_uses_lookups(&resolved.command) {
        warn!("APIKEY is not set; ISBN lookups and title searches will find nothing");
    }
    let store = JsonFileStore::new(&resolved.cli.data_file);
    let catalog = Catalog::new(Arc::new(store), Arc::new(provider));

    match resolved.command {
        Command::Serve(serve_args) => commands::run_serve_command(catalog, &serve_args).await,
        Command::List => commands::run_list_command(&catalog),
        Command::Add(add_args) => commands::run_add_command(&catalog, &add_args).await,
        Command::Remove(remove_args) => commands::run_remove_command(&catalog, &remove_args),
    }
}

/// Commands that may reach the metadata provider.
fn command_uses_lookups(command: &Command) -> bool {
    match command {
        Command::Serve(_) => true,
        Command::Add(args) => !args.manual,
        Command::List | Command::Remove(_) => false,
    }
}
