/// Admin API routes
use crate::{
    error::{Result, ServerError},
    services::{Bucket, SONGS_BUCKET},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateBucketResponse {
    pub success: bool,
    pub bucket: Bucket,
}

/// GET /api/admin/create-songs-bucket - Create the public songs bucket
pub async fn create_songs_bucket(
    State(app_state): State<AppState>,
) -> Result<Json<CreateBucketResponse>> {
    if !app_state.admin_enabled {
        return Err(ServerError::Failed(
            "Missing HARMONY_ADMIN__SERVICE_KEY in server environment".to_string(),
        ));
    }

    let bucket = app_state.objects.create_bucket(SONGS_BUCKET).await?;

    Ok(Json(CreateBucketResponse {
        success: true,
        bucket,
    }))
}
