//! Playlists
//!
//! Song lists are stored as a JSON array column; edits are
//! read-modify-write on that column inside one write transaction.

use crate::error::{Result, StorageError};
use chrono::{DateTime, SecondsFormat, Utc};
use harmony_core::{CreatePlaylist, Playlist, PlaylistId, Track, UpdatePlaylist};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, songs, owner_id, is_public, created_at FROM playlists";

fn from_row(row: &SqliteRow) -> Result<Playlist> {
    let songs: String = row.try_get("songs")?;
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StorageError::Corrupt(format!("created_at '{}': {}", created_at, e)))?
        .with_timezone(&Utc);

    Ok(Playlist {
        id: PlaylistId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        songs: serde_json::from_str(&songs)?,
        created_at,
        owner_id: row.try_get("owner_id")?,
        is_public: row.try_get::<i64, _>("is_public")? != 0,
    })
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let mut created = Playlist::new(playlist.owner_id, playlist.title);
    created.description = playlist.description;
    created.songs = playlist.songs;
    created.is_public = playlist.is_public;

    sqlx::query(
        r"
        INSERT INTO playlists (id, title, description, songs, owner_id, is_public, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(created.id.as_str())
    .bind(&created.title)
    .bind(&created.description)
    .bind(serde_json::to_string(&created.songs)?)
    .bind(&created.owner_id)
    .bind(i64::from(created.is_public))
    .bind(timestamp(created.created_at))
    .execute(pool)
    .await?;

    tracing::debug!(playlist_id = %created.id, owner = %created.owner_id, "playlist created");
    Ok(created)
}

/// Get an owner's playlists, newest first
pub async fn list_for_owner(pool: &SqlitePool, owner_id: &str) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!(
        "{} WHERE owner_id = ? ORDER BY created_at DESC, rowid DESC",
        SELECT_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get playlist by ID
pub async fn get(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get playlist by ID only if it is shared publicly
pub async fn get_public(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!("{} WHERE id = ? AND is_public = 1", SELECT_COLUMNS))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Apply a partial update
///
/// # Errors
/// `StorageError::NotFound` if the playlist does not exist
pub async fn update(pool: &SqlitePool, id: &PlaylistId, update: UpdatePlaylist) -> Result<Playlist> {
    edit(pool, id, |playlist| {
        playlist.apply(update);
        true
    })
    .await
}

/// Delete a playlist, returning whether it existed
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Append a song
pub async fn add_song(pool: &SqlitePool, id: &PlaylistId, song: Track) -> Result<Playlist> {
    edit(pool, id, |playlist| {
        playlist.add_song(song);
        true
    })
    .await
}

/// Remove every copy of a song
pub async fn remove_song(pool: &SqlitePool, id: &PlaylistId, song_id: &str) -> Result<Playlist> {
    edit(pool, id, |playlist| playlist.remove_song(song_id)).await
}

/// Read, modify and write one playlist inside a single write transaction.
///
/// `change` returns whether anything needs saving.
async fn edit<F>(pool: &SqlitePool, id: &PlaylistId, change: F) -> Result<Playlist>
where
    F: FnOnce(&mut Playlist) -> bool,
{
    let mut tx = pool.begin().await?;

    // Write first to hold the write lock before reading; concurrent edits
    // wait on busy_timeout.
    let locked = sqlx::query("UPDATE playlists SET songs = songs WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;
    if locked.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id.as_str()));
    }

    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id.as_str())
        .fetch_one(&mut *tx)
        .await?;
    let mut playlist = from_row(&row)?;

    if change(&mut playlist) {
        save(&mut tx, &playlist).await?;
    }
    tx.commit().await?;
    Ok(playlist)
}

async fn save(conn: &mut SqliteConnection, playlist: &Playlist) -> Result<()> {
    sqlx::query(
        r"
        UPDATE playlists
        SET title = ?, description = ?, songs = ?, is_public = ?
        WHERE id = ?
        ",
    )
    .bind(&playlist.title)
    .bind(&playlist.description)
    .bind(serde_json::to_string(&playlist.songs)?)
    .bind(i64::from(playlist.is_public))
    .bind(playlist.id.as_str())
    .execute(conn)
    .await?;
    Ok(())
}
