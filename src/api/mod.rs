//! HTTP API over the catalog.
//!
//! # Routes
//!
//! | Method & path               | Handler                     |
//! |-----------------------------|-----------------------------|
//! | `GET /api/livros`           | [`books::list_books`]       |
//! | `POST /api/livros/isbn`     | [`books::add_by_isbn`]      |
//! | `GET /api/buscar?q=`        | [`books::search_books`]     |
//! | `POST /api/livros/adicionar`| [`books::add_selected`]     |
//! | `POST /api/livros/manual`   | [`books::add_manual`]       |
//! | `DELETE /api/livros/:index` | [`books::remove_book`]      |
//! | `GET /health`               | [`health::health_check`]    |
//!
//! Anything else is served from the static directory, when one is set.
//! Handlers are stateless; every request reads the store afresh.

pub mod books;
pub mod error;
pub mod health;

pub use error::ApiError;
pub use health::health_routes;

use std::path::PathBuf;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::catalog::Catalog;

/// Application state shared across HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

/// Builds the application router.
///
/// `static_dir` is mounted as the fallback service for the frontend.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/api/livros", get(books::list_books))
        .route("/api/livros/isbn", post(books::add_by_isbn))
        .route("/api/livros/adicionar", post(books::add_selected))
        .route("/api/livros/manual", post(books::add_manual))
        .route("/api/livros/:index", delete(books::remove_book))
        .route("/api/buscar", get(books::search_books))
        .merge(health_routes());

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
