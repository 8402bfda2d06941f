//! Remove command handler.

use anyhow::Result;
use bookshelf_core::catalog::Catalog;

use crate::cli::RemoveArgs;

pub fn run_remove_command(catalog: &Catalog, args: &RemoveArgs) -> Result<()> {
    let removed = catalog.remove(args.index)?;
    println!("Removed: {removed}");
    Ok(())
}
