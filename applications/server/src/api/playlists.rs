/// Playlists API routes
///
/// Identity is supplied by the caller (`ownerId`, `?owner=`); there is no
/// authentication layer in front of these routes.
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use harmony_core::{CreatePlaylist, Playlist, PlaylistId, Track, UpdatePlaylist};
use harmony_storage::playlists;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    #[serde(default)]
    pub owner: Option<String>,
}

/// GET /api/playlists?owner= - Playlists of one owner, newest first
pub async fn list_playlists(
    State(app_state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<Playlist>>> {
    let owner = params
        .owner
        .filter(|owner| !owner.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("owner query parameter is required".to_string()))?;

    let playlists = playlists::list_for_owner(app_state.db.pool(), &owner).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists - Create a playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    Json(req): Json<CreatePlaylist>,
) -> Result<(StatusCode, Json<Playlist>)> {
    if req.title.trim().is_empty() {
        return Err(ServerError::BadRequest("Playlist title is required".to_string()));
    }
    if req.owner_id.trim().is_empty() {
        return Err(ServerError::BadRequest("ownerId is required".to_string()));
    }

    let playlist = playlists::create(app_state.db.pool(), req).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id - Playlist with its songs
pub async fn get_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Playlist>> {
    let playlist = playlists::get(app_state.db.pool(), &PlaylistId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}

/// PUT /api/playlists/:id - Partial update
pub async fn update_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePlaylist>,
) -> Result<Json<Playlist>> {
    if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ServerError::BadRequest("Playlist title is required".to_string()));
    }

    let playlist = playlists::update(app_state.db.pool(), &PlaylistId::new(id), req).await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if playlists::delete(app_state.db.pool(), &PlaylistId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound("Playlist not found".to_string()))
    }
}

/// POST /api/playlists/:id/songs - Append a song
pub async fn add_song(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(song): Json<Track>,
) -> Result<Json<Playlist>> {
    let playlist = playlists::add_song(app_state.db.pool(), &PlaylistId::new(id), song).await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id/songs/:song_id - Remove a song
pub async fn remove_song(
    State(app_state): State<AppState>,
    Path((id, song_id)): Path<(String, String)>,
) -> Result<Json<Playlist>> {
    let playlist =
        playlists::remove_song(app_state.db.pool(), &PlaylistId::new(id), &song_id).await?;
    Ok(Json(playlist))
}

/// GET /api/share/:id - Public view of a shared playlist
///
/// Private playlists answer 404 so share ids cannot be enumerated.
pub async fn get_shared_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Playlist>> {
    let playlist = playlists::get_public(app_state.db.pool(), &PlaylistId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(playlist))
}
