//! Book endpoints consumed by the browser frontend.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;
use crate::book::BookRecord;
use crate::catalog::SearchOutcome;

use super::AppState;

/// Body of `POST /api/livros/isbn`.
#[derive(Debug, Deserialize)]
pub struct IsbnRequest {
    #[serde(default)]
    pub isbn: Option<String>,
}

/// Body of `POST /api/livros/manual`.
#[derive(Debug, Deserialize)]
pub struct ManualRequest {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
}

/// Query of `GET /api/buscar`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Body returned by `DELETE /api/livros/:index`.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    #[serde(rename = "sucesso")]
    pub success: bool,
}

/// GET /api/livros
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookRecord>>, ApiError> {
    Ok(Json(state.catalog.list()?))
}

/// POST /api/livros/isbn
///
/// Looks the ISBN up and stores the result, or an incomplete placeholder when
/// nothing was found.
pub async fn add_by_isbn(
    State(state): State<AppState>,
    payload: Result<Json<IsbnRequest>, JsonRejection>,
) -> Result<Json<BookRecord>, ApiError> {
    let Json(request) = payload?;
    let isbn = request
        .isbn
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::missing("isbn"))?;

    let book = state.catalog.add_by_identifier(&isbn).await?;
    Ok(Json(book))
}

/// GET /api/buscar?q=
///
/// Returns `[]` for queries under three characters.
pub async fn search_books(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<BookRecord>>, ApiError> {
    let Query(params) = params?;
    let query = params
        .q
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::missing("q"))?;

    let outcome = state.catalog.search(&query).await;
    if outcome == SearchOutcome::TooShort {
        debug!(query = %query, "Search query below minimum length");
    }
    Ok(Json(outcome.into_candidates()))
}

/// POST /api/livros/adicionar
pub async fn add_selected(
    State(state): State<AppState>,
    payload: Result<Json<BookRecord>, JsonRejection>,
) -> Result<Json<BookRecord>, ApiError> {
    let Json(candidate) = payload?;
    Ok(Json(state.catalog.add_selected(candidate)?))
}

/// POST /api/livros/manual
pub async fn add_manual(
    State(state): State<AppState>,
    payload: Result<Json<ManualRequest>, JsonRejection>,
) -> Result<Json<BookRecord>, ApiError> {
    let Json(request) = payload?;
    let title = request.title.unwrap_or_default();
    Ok(Json(state.catalog.add_manual(&title)?))
}

/// DELETE /api/livros/:index
///
/// A non-integer index is reported like an out-of-range one.
pub async fn remove_book(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<RemoveResponse>, ApiError> {
    let position: i64 = index
        .trim()
        .parse()
        .map_err(|_| ApiError::UnknownIndex(index.clone()))?;

    state.catalog.remove(position)?;
    Ok(Json(RemoveResponse { success: true }))
}
