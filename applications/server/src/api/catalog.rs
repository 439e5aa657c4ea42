/// Song-catalog API routes
use crate::{
    api::{SearchParams, SearchResponse},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use harmony_core::Track;

/// GET /api/catalog/search?q= - Search the song catalog
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params
        .query()
        .ok_or_else(|| ServerError::BadRequest("Query parameter is required".to_string()))?;

    let tracks = app_state
        .catalog
        .search(query)
        .await
        .map_err(|e| e.context("Failed to search catalog"))?;

    Ok(Json(tracks.into()))
}

/// GET /api/catalog/track/:id - Fetch one catalog track
pub async fn get_track(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Track>> {
    let track = app_state
        .catalog
        .track(&id)
        .await
        .map_err(|e| e.context("Failed to fetch track"))?;

    Ok(Json(track))
}
