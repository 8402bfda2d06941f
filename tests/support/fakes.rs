//! In-memory metadata provider for driving the catalog without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use bookshelf_core::book::BookRecord;
use bookshelf_core::provider::MetadataProvider;

/// Provider answering from fixed tables and counting calls.
#[derive(Default)]
pub struct ScriptedProvider {
    by_isbn: Vec<BookRecord>,
    by_text: Vec<BookRecord>,
    calls: Mutex<usize>,
}

impl ScriptedProvider {
    pub fn with_isbn_match(mut self, record: BookRecord) -> Self {
        self.by_isbn.push(record);
        self
    }

    pub fn with_search_results(mut self, records: Vec<BookRecord>) -> Self {
        self.by_text = records;
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn count(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl MetadataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn lookup_by_identifier(&self, isbn: &str) -> Option<BookRecord> {
        self.count();
        self.by_isbn.iter().find(|record| record.isbn == isbn).cloned()
    }

    async fn lookup_by_text(&self, _query: &str, limit: usize) -> Vec<BookRecord> {
        self.count();
        self.by_text.iter().take(limit).cloned().collect()
    }
}

/// A fully populated record as a provider would return it.
pub fn complete_book(isbn: &str, title: &str, author: &str) -> BookRecord {
    BookRecord {
        isbn: isbn.to_string(),
        authors: vec![author.to_string()],
        publisher: "Addison-Wesley".to_string(),
        published_date: "2015-10-26".to_string(),
        description: "A book.".to_string(),
        page_count: 380,
        cover_url: "http://books.google.com/books/content?id=x".to_string(),
        categories: vec!["Computers".to_string()],
        ..BookRecord::new(title)
    }
}
