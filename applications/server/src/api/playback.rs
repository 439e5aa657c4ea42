/// Now-playing session API routes
///
/// One server-held controller is the single writer of the session. Command
/// routes answer with the new state plus the events the command produced.
use crate::{
    error::{Result, ServerError},
    services::RemoteMedia,
    state::AppState,
};
use axum::{extract::State, Json};
use harmony_core::Track;
use harmony_playback::{
    MediaEvent, PlayOutcome, PlaybackController, PlaybackEvent, PlaybackSnapshot,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackResponse {
    #[serde(flatten)]
    pub state: PlaybackSnapshot,
    /// What the browser's audio element should mirror
    pub media: RemoteMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PlayOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PlaybackEvent>,
}

impl PlaybackResponse {
    fn from_controller(
        controller: &mut PlaybackController<RemoteMedia>,
        outcome: Option<PlayOutcome>,
    ) -> Self {
        Self {
            state: controller.snapshot(),
            media: controller.media().clone(),
            outcome,
            events: controller.drain_events(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub track: Track,
    /// List the track was started from
    #[serde(default)]
    pub queue: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct SetQueueRequest {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct NowPlayingRequest {
    #[serde(default)]
    pub track: Option<Track>,
    #[serde(default)]
    pub queue: Vec<Track>,
    #[serde(default)]
    pub autoplay: bool,
}

/// GET /api/playback - Current session state
pub async fn get_playback(State(app_state): State<AppState>) -> Result<Json<PlaybackResponse>> {
    let controller = app_state.playback.lock().await;
    Ok(Json(PlaybackResponse {
        state: controller.snapshot(),
        media: controller.media().clone(),
        outcome: None,
        events: Vec::new(),
    }))
}

/// POST /api/playback/play - Play a track from a list
pub async fn play(
    State(app_state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    let outcome = controller.play(req.track, req.queue).await;
    Ok(Json(PlaybackResponse::from_controller(
        &mut controller,
        Some(outcome),
    )))
}

/// POST /api/playback/pause
pub async fn pause(State(app_state): State<AppState>) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    controller.pause();
    Ok(Json(PlaybackResponse::from_controller(&mut controller, None)))
}

/// POST /api/playback/toggle
pub async fn toggle(State(app_state): State<AppState>) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    controller.toggle().await;
    Ok(Json(PlaybackResponse::from_controller(&mut controller, None)))
}

/// POST /api/playback/next
pub async fn next(State(app_state): State<AppState>) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    let outcome = controller.next().await;
    Ok(Json(PlaybackResponse::from_controller(&mut controller, outcome)))
}

/// POST /api/playback/previous
pub async fn previous(State(app_state): State<AppState>) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    let outcome = controller.previous().await;
    Ok(Json(PlaybackResponse::from_controller(&mut controller, outcome)))
}

/// PUT /api/playback/queue - Replace the queue verbatim
pub async fn set_queue(
    State(app_state): State<AppState>,
    Json(req): Json<SetQueueRequest>,
) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    controller.set_queue(req.tracks);
    Ok(Json(PlaybackResponse::from_controller(&mut controller, None)))
}

/// PUT /api/playback/now-playing - Mirror an external player
pub async fn set_now_playing(
    State(app_state): State<AppState>,
    Json(req): Json<NowPlayingRequest>,
) -> Result<Json<PlaybackResponse>> {
    let mut controller = app_state.playback.lock().await;
    controller.set_now_playing(req.track, req.queue, req.autoplay);
    Ok(Json(PlaybackResponse::from_controller(&mut controller, None)))
}

/// POST /api/playback/media-event - Progress reported by the browser
pub async fn media_event(
    State(app_state): State<AppState>,
    Json(event): Json<MediaEvent>,
) -> Result<Json<PlaybackResponse>> {
    if let MediaEvent::TimeUpdate(s) | MediaEvent::LoadedMetadata(s) = event {
        if !s.is_finite() || s < 0.0 {
            return Err(ServerError::BadRequest(format!("Invalid media time: {}", s)));
        }
    }

    let mut controller = app_state.playback.lock().await;
    controller.handle_media_event(event);
    Ok(Json(PlaybackResponse::from_controller(&mut controller, None)))
}
