//! Request handlers for the v1 read API.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use localess_store::{paths, ContentLink, ContentQuery};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::{resolve_locale, AppState};

const JSON_CONTENT_TYPE: &str = "application/json";

fn cached_json(cache_control: String, body: Bytes) -> Response {
    (
        [
            (header::CACHE_CONTROL, cache_control),
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE.to_string()),
        ],
        body,
    )
        .into_response()
}

/// `GET /api/v1/spaces/{spaceId}/translations/{locale}.json`
pub async fn translations(
    State(state): State<AppState>,
    Path((space_id, file)): Path<(String, String)>,
) -> Result<Response> {
    info!(space_id = %space_id, file = %file, "v1 spaces translations");
    let locale = file.strip_suffix(".json").ok_or(ApiError::RouteNotFound)?;
    let space = state.space(&space_id).await?;
    let locale = resolve_locale(&space, locale);
    let body = state
        .blob(&paths::translation_blob(&space_id, locale))
        .await?;
    Ok(cached_json(state.cache_control(), body))
}

/// `GET /api/v1/spaces/{spaceId}/links?kind=&startSlug=`
pub async fn links(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    query: std::result::Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    info!(
        space_id = %space_id,
        kind = ?query.kind,
        start_slug = ?query.start_slug,
        "v1 spaces links"
    );
    state.space(&space_id).await?;
    let links: Vec<ContentLink> = state
        .repo
        .find_contents(&space_id, &query)
        .await?
        .iter()
        .map(ContentLink::from)
        .collect();
    Ok((
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(links),
    )
        .into_response())
}

/// `GET /api/v1/spaces/{spaceId}/contents/{contentId}/{locale}`
pub async fn content(
    State(state): State<AppState>,
    Path((space_id, content_id, locale)): Path<(String, String, String)>,
) -> Result<Response> {
    info!(
        space_id = %space_id,
        content_id = %content_id,
        locale = %locale,
        "v1 spaces content"
    );
    let space = state.space(&space_id).await?;
    let locale = resolve_locale(&space, &locale);
    let body = state
        .blob(&paths::content_blob(&space_id, &content_id, locale))
        .await?;
    Ok(cached_json(state.cache_control(), body))
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
