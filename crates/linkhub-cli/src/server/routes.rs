//! Route handlers
//!
//! Each handler maps one request onto store and query calls and returns
//! JSON (or a redirect). Store calls do file I/O and may wait on the writer
//! lock, so they run on the blocking pool.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkhub_core::{distinct_categories, Link, LinkQuery, NewLink, Store};

use super::error::AppError;
use super::AppState;

/// Listing page data
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexView {
    /// Links matching the query
    pub links: Vec<Link>,
    /// Categories across the whole collection, sorted
    pub categories: BTreeSet<String>,
    pub q: String,
    pub category: String,
    pub now: DateTime<Utc>,
}

/// Admin page data
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminView {
    pub links: Vec<Link>,
    pub data_file: String,
}

/// Form posted to `/admin/add`
#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pass: String,
}

/// Form posted to `/admin/delete`
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub pass: String,
}

/// Run a store call off the async workers
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Store) -> linkhub_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(result?)
}

/// GET /?q=&category=
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<LinkQuery>,
) -> Result<Json<IndexView>, AppError> {
    let links = with_store(&state, |store| store.list()).await?;
    let categories = distinct_categories(&links);

    Ok(Json(IndexView {
        links: query.apply(links),
        categories,
        q: query.text.trim().to_string(),
        category: query.category.trim().to_string(),
        now: Utc::now(),
    }))
}

/// GET /r/:id
pub async fn redirect_link(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    let link = with_store(&state, move |store| store.find_by_id(id)).await?;
    Ok(Redirect::to(&link.url))
}

/// GET /admin
pub async fn admin_index(State(state): State<AppState>) -> Result<Json<AdminView>, AppError> {
    let view = with_store(&state, |store| {
        let links = store.list()?;
        let data_file = std::fs::canonicalize(store.data_file())
            .unwrap_or_else(|_| store.data_file().to_path_buf());
        Ok(AdminView {
            links,
            data_file: data_file.display().to_string(),
        })
    })
    .await?;

    Ok(Json(view))
}

/// POST /admin/add
pub async fn admin_add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Redirect, AppError> {
    state.store.authorize(&form.pass)?;

    let new = NewLink::new(form.title, form.url)
        .category(form.category)
        .notes(form.notes);
    with_store(&state, move |store| store.add(new)).await?;

    Ok(Redirect::to("/admin"))
}

/// POST /admin/delete
pub async fn admin_delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    state.store.authorize(&form.pass)?;

    let id: u64 = form
        .id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid link id: {:?}", form.id)))?;
    with_store(&state, move |store| store.delete_by_id(id)).await?;

    Ok(Redirect::to("/admin"))
}

/// GET /api/links
pub async fn api_links(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    Ok(Json(with_store(&state, |store| store.list()).await?))
}
