/// Uploaded-song API routes
use crate::{
    api::{SearchParams, SearchResponse},
    error::{Result, ServerError},
    services::SONGS_BUCKET,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use harmony_core::Track;
use harmony_storage::songs;

/// GET /api/local/search?q= - Search uploaded songs
///
/// A blank query returns an empty page without touching storage.
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let Some(query) = params.query() else {
        return Ok(Json(Vec::<Track>::new().into()));
    };

    let rows = songs::search(app_state.db.pool(), query, songs::MAX_SEARCH_RESULTS)
        .await
        .map_err(|e| ServerError::from(e).context("Search failed"))?;

    let objects = &app_state.objects;
    let tracks: Vec<Track> = rows
        .into_iter()
        .map(|row| row.into_track(|path| objects.public_url(SONGS_BUCKET, path)))
        .collect();

    Ok(Json(tracks.into()))
}

/// GET /api/local/songs/:id - Fetch one uploaded song
pub async fn get_song(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Track>> {
    let row = songs::get_by_id(app_state.db.pool(), &id)
        .await
        .map_err(|e| ServerError::from(e).context("Failed to fetch song"))?
        .ok_or_else(|| ServerError::NotFound("Not found".to_string()))?;

    let objects = &app_state.objects;
    Ok(Json(
        row.into_track(|path| objects.public_url(SONGS_BUCKET, path)),
    ))
}
