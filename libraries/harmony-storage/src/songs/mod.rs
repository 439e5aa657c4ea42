//! Uploaded songs
//!
//! Rows are returned as [`LocalSongRow`]; turning them into tracks needs the
//! object-storage URL resolver and happens at the HTTP boundary.

use crate::error::Result;
use harmony_core::LocalSongRow;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Upper bound on search results
pub const MAX_SEARCH_RESULTS: u32 = 50;

/// Data for inserting a song row
#[derive(Debug, Clone, Default)]
pub struct NewSong {
    /// Explicit id; a UUID is generated when absent
    pub id: Option<String>,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub file_path: Option<String>,
    pub cover_image_path: Option<String>,
    pub duration_seconds: Option<i64>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

fn from_row(row: &SqliteRow) -> Result<LocalSongRow> {
    Ok(LocalSongRow {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        file_path: row.try_get("file_path")?,
        cover_image_path: row.try_get("cover_image_path")?,
        duration_seconds: row.try_get("duration_seconds")?,
        file_name: row.try_get("file_name")?,
    })
}

/// Escape LIKE wildcards so the query matches literally
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Search songs by query (case-insensitive substring of title, artist or album)
///
/// `limit` is capped at [`MAX_SEARCH_RESULTS`].
pub async fn search(pool: &SqlitePool, query: &str, limit: u32) -> Result<Vec<LocalSongRow>> {
    let pattern = like_pattern(query);
    let limit = limit.min(MAX_SEARCH_RESULTS);

    let rows = sqlx::query(
        r"
        SELECT id, title, artist, album, file_path, cover_image_path,
               duration_seconds, file_name
        FROM songs
        WHERE title LIKE ?1 ESCAPE '\'
           OR artist LIKE ?1 ESCAPE '\'
           OR album LIKE ?1 ESCAPE '\'
        ORDER BY title COLLATE NOCASE
        LIMIT ?2
        ",
    )
    .bind(&pattern)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<LocalSongRow>> {
    let row = sqlx::query(
        r"
        SELECT id, title, artist, album, file_path, cover_image_path,
               duration_seconds, file_name
        FROM songs
        WHERE id = ?
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Insert a song row, returning its id
pub async fn insert(pool: &SqlitePool, song: NewSong) -> Result<String> {
    let id = song
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    sqlx::query(
        r"
        INSERT INTO songs (id, title, artist, album, file_path, cover_image_path,
                           duration_seconds, file_name, file_size, mime_type)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&id)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(&song.file_path)
    .bind(&song.cover_image_path)
    .bind(song.duration_seconds)
    .bind(&song.file_name)
    .bind(song.file_size)
    .bind(&song.mime_type)
    .execute(pool)
    .await?;

    tracing::debug!(song_id = %id, title = %song.title, "song inserted");
    Ok(id)
}
