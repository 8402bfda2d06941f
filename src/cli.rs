//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bookshelf_core::store::DEFAULT_DATA_FILE;

pub(crate) const DEFAULT_BIND: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 3000;
pub(crate) const DEFAULT_STATIC_DIR: &str = "public";
pub(crate) const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Personal book catalog backed by Google Books.
///
/// Scan or type an ISBN, or search by title, and keep the results in a local
/// JSON file. Runs the web frontend by default.
#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path of the JSON record file
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Google Books API key (lookups always miss without one)
    #[arg(long, global = true, env = "APIKEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Metadata lookup timeout in seconds (1-120)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_LOOKUP_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=120)
    )]
    pub lookup_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the HTTP API and the web frontend (default)
    Serve(ServeArgs),

    /// Print every cataloged book, most recent first
    List,

    /// Add a book by ISBN or by title
    Add(AddArgs),

    /// Remove the book at a position shown by `list`
    Remove(RemoveArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Port to listen on
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Directory holding the web frontend
    #[arg(long, default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// A 10 or 13 digit ISBN, or a title to search for
    pub input: String,

    /// Add search result N (as numbered in the candidate list)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub pick: Option<u16>,

    /// Save the title as an incomplete record without searching
    #[arg(long, conflicts_with = "pick")]
    pub manual: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// Position in the list, starting at 0
    #[arg(allow_negative_numbers = true)]
    pub index: i64,
}
