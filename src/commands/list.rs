//! List command handler.

use anyhow::Result;
use bookshelf_core::catalog::Catalog;

pub fn run_list_command(catalog: &Catalog) -> Result<()> {
    let books = catalog.list()?;
    if books.is_empty() {
        println!("The shelf is empty.");
        return Ok(());
    }

    for (index, book) in books.iter().enumerate() {
        println!("{index:>3}  {book}");
    }
    println!("{} book(s)", books.len());
    Ok(())
}
