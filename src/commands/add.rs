//! Add command handler: classifies the input and follows the matching path.
//!
//! - barcode: identifier lookup, placeholder on a miss
//! - title: search and print numbered candidates; `--pick N` stores one
//! - `--manual`: store the title as an incomplete record, no search

use anyhow::{Result, bail};
use bookshelf_core::BookRecord;
use bookshelf_core::catalog::{Catalog, SearchOutcome};
use bookshelf_core::parser::{InputKind, MIN_QUERY_CHARS, classify};

use crate::cli::AddArgs;

pub async fn run_add_command(catalog: &Catalog, args: &AddArgs) -> Result<()> {
    let kind = classify(&args.input);

    if args.manual {
        let Some(title) = kind.text() else {
            bail!("Nothing to add: input is empty");
        };
        report_added(&catalog.add_manual(title)?);
        return Ok(());
    }

    match kind {
        InputKind::Empty => bail!("Nothing to add: input is empty"),
        InputKind::Barcode(isbn) => {
            report_added(&catalog.add_by_identifier(&isbn).await?);
        }
        InputKind::TitleQuery(query) => add_from_search(catalog, &query, args.pick).await?,
        InputKind::Partial(text) => bail!(
            "'{text}' is too short to search; type at least {MIN_QUERY_CHARS} characters or pass --manual"
        ),
    }
    Ok(())
}

async fn add_from_search(catalog: &Catalog, query: &str, pick: Option<u16>) -> Result<()> {
    let candidates = match catalog.search(query).await {
        SearchOutcome::TooShort => {
            bail!("'{query}' is too short to search; type at least {MIN_QUERY_CHARS} characters")
        }
        SearchOutcome::Candidates(list) => list,
    };

    if candidates.is_empty() {
        println!("No matches for '{query}'.");
        println!("Re-run with --manual to save it as an incomplete record.");
        return Ok(());
    }

    let Some(pick) = pick else {
        print!("{}", render_candidates(&candidates));
        println!("Re-run with --pick N to add one, or --manual to save the title as typed.");
        return Ok(());
    };

    let Some(candidate) = candidates.get(usize::from(pick) - 1) else {
        bail!(
            "--pick {pick} is out of range: the search returned {} candidate(s)",
            candidates.len()
        );
    };

    let book = catalog.add_selected(candidate.clone())?;
    report_added(&book);
    Ok(())
}

fn report_added(book: &BookRecord) {
    println!("Added: {book}");
    if book.incomplete {
        println!("No metadata found; saved as incomplete.");
    }
}

/// Numbered candidate list, starting at 1 to match `--pick`.
fn render_candidates(candidates: &[BookRecord]) -> String {
    let mut out = String::new();
    for (index, candidate) in candidates.iter().enumerate() {
        out.push_str(&format!("{:>3}. {candidate}", index + 1));
        if !candidate.published_date.is_empty() {
            out.push_str(&format!(" ({})", candidate.published_date));
        }
        out.push('\n');
    }
    out
}
