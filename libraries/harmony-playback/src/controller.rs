//! Playback controller - core orchestration
//!
//! Owns current track, queue, playing flag and media clock, and keeps the one
//! shared media handle pointed at the current track.

use crate::{
    events::PlaybackEvent,
    media::{MediaEvent, MediaHandle},
    queue::Queue,
    types::{PlayOutcome, PlaybackSnapshot, PlayerStatus},
};
use harmony_core::Track;
use tracing::{debug, warn};

/// Playback queue controller
///
/// State machine:
///
/// ```text
///  Idle ──play──▶ Playing ◀──toggle/pause──▶ Paused
///                    │                          │
///                    └─next/previous (neighbour)┘──▶ Playing
///                    └─next at tail──────────────▶ Paused (position 0)
/// ```
///
/// Invariant: without a current track `is_playing` is false and the
/// position is 0.
pub struct PlaybackController<M: MediaHandle> {
    media: M,

    // State
    current_track: Option<Track>,
    queue: Queue,
    is_playing: bool,

    // Whether the media handle holds the current track's source
    source_loaded: bool,

    // Media clock (seconds)
    position: f64,
    duration: f64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaHandle> PlaybackController<M> {
    /// Create an idle controller that owns `media`
    pub fn new(media: M) -> Self {
        Self {
            media,
            current_track: None,
            queue: Queue::new(),
            is_playing: false,
            source_loaded: false,
            position: 0.0,
            duration: 0.0,
            pending_events: Vec::new(),
        }
    }

    /// Play `track`, queueing it ahead of `source_queue`
    ///
    /// The queue becomes `track` followed by `source_queue` without `track`.
    /// A track without a playable-source reference becomes current but
    /// nothing plays; the media handle is left unset.
    pub async fn play(&mut self, track: Track, source_queue: Vec<Track>) -> PlayOutcome {
        debug!(track_id = %track.id, queued = source_queue.len(), "play");

        let source = track.preview_url.clone().filter(|url| !url.is_empty());
        let track_id = track.id.clone();

        self.queue = Queue::with_head(track.clone(), source_queue);
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.set_current(Some(track));
        self.position = 0.0;

        let Some(url) = source else {
            self.media.pause();
            self.media.clear_source();
            self.source_loaded = false;
            self.duration = 0.0;
            self.set_playing(false);
            self.emit(PlaybackEvent::PreviewUnavailable { track_id });
            return PlayOutcome::NoPreview;
        };

        self.media.set_source(&url);
        self.source_loaded = true;
        self.duration = self
            .current_track
            .as_ref()
            .map_or(0.0, |t| f64::from(t.duration));

        self.start_media().await
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.media.pause();
        self.set_playing(false);
    }

    /// Flip between playing and paused
    ///
    /// Returns the new `is_playing` value. Resuming can fail (no track, no
    /// preview, media refusal), in which case the controller stays paused.
    pub async fn toggle(&mut self) -> bool {
        if self.is_playing {
            self.pause();
        } else {
            self.resume().await;
        }
        self.is_playing
    }

    /// Resume the current track
    ///
    /// Loads the preview into the media handle first when the track was set
    /// through `set_now_playing`.
    pub async fn resume(&mut self) -> PlayOutcome {
        let Some(track) = &self.current_track else {
            return PlayOutcome::NothingLoaded;
        };
        let Some(url) = track.preview_url.clone().filter(|url| !url.is_empty()) else {
            return PlayOutcome::NoPreview;
        };
        if !self.source_loaded {
            self.media.set_source(&url);
            self.source_loaded = true;
        }
        self.start_media().await
    }

    /// Play the track after the current one
    ///
    /// The existing queue is passed through `play`, so the successor moves to
    /// the head. At the tail nothing wraps around: playback stops and the
    /// position resets while the current track is retained. Returns `None`
    /// when there was nothing to advance to.
    pub async fn next(&mut self) -> Option<PlayOutcome> {
        let current_id = self.current_track.as_ref()?.id.clone();

        if let Some(successor) = self.queue.after(&current_id).cloned() {
            let queue = self.queue.to_vec();
            return Some(self.play(successor, queue).await);
        }

        debug!(track_id = %current_id, "next at end of queue");
        self.media.pause();
        self.media.seek(0.0);
        self.set_playing(false);
        self.reset_position();
        None
    }

    /// Play the track before the current one
    ///
    /// Without a predecessor only the position resets; current track and
    /// playing flag are unchanged.
    pub async fn previous(&mut self) -> Option<PlayOutcome> {
        let current_id = self.current_track.as_ref()?.id.clone();

        if let Some(predecessor) = self.queue.before(&current_id).cloned() {
            let queue = self.queue.to_vec();
            return Some(self.play(predecessor, queue).await);
        }

        self.media.seek(0.0);
        self.reset_position();
        None
    }

    /// Replace the queue verbatim
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.queue.replace(tracks);
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Reflect a track as now playing without driving audio
    ///
    /// Used when an external player performs playback: current track and
    /// queue are set directly (no head reordering) and `autoplay` decides the
    /// playing flag. The controller's own media handle is silenced. Passing
    /// `None` returns the controller to idle.
    pub fn set_now_playing(&mut self, track: Option<Track>, queue: Vec<Track>, autoplay: bool) {
        self.media.pause();
        self.media.clear_source();
        self.source_loaded = false;

        self.set_queue(queue);
        self.duration = track.as_ref().map_or(0.0, |t| f64::from(t.duration));
        self.set_current(track);
        self.position = 0.0;

        let playing = autoplay && self.current_track.is_some();
        self.set_playing(playing);
    }

    /// Feed a notification from the media handle
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(seconds) => {
                if self.current_track.is_some() && seconds.is_finite() {
                    self.position = seconds.max(0.0);
                }
            }
            MediaEvent::LoadedMetadata(seconds) => {
                if seconds.is_finite() {
                    self.duration = seconds.max(0.0);
                }
            }
            MediaEvent::Ended => {
                self.set_playing(false);
            }
        }
    }

    /// Current state machine position
    pub fn status(&self) -> PlayerStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), true) => PlayerStatus::Playing,
            (Some(_), false) => PlayerStatus::Paused,
        }
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Queue in playback order
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playhead in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration of the current source in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Borrow the media handle
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutably borrow the media handle
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Point-in-time copy of the observable state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track.clone(),
            queue: self.queue.to_vec(),
            is_playing: self.is_playing,
            position_seconds: self.position,
            duration_seconds: self.duration,
            status: self.status(),
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    async fn start_media(&mut self) -> PlayOutcome {
        match self.media.play().await {
            Ok(()) => {
                self.set_playing(true);
                PlayOutcome::Started
            }
            Err(e) => {
                warn!(error = %e, "play request failed");
                self.set_playing(false);
                self.emit(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                PlayOutcome::Failed(e.to_string())
            }
        }
    }

    fn set_current(&mut self, track: Option<Track>) {
        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        let track_id = track.as_ref().map(|t| t.id.clone());
        let before = self.status();
        self.current_track = track;

        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });

        if self.current_track.is_none() {
            self.is_playing = false;
            self.position = 0.0;
            if before != PlayerStatus::Idle {
                self.emit(PlaybackEvent::StateChanged {
                    status: PlayerStatus::Idle,
                });
            }
        }
    }

    fn set_playing(&mut self, playing: bool) {
        let playing = playing && self.current_track.is_some();
        let before = self.status();
        self.is_playing = playing;
        let after = self.status();
        if before != after {
            debug!(?before, ?after, "playback state changed");
            self.emit(PlaybackEvent::StateChanged { status: after });
        }
    }

    fn reset_position(&mut self) {
        self.position = 0.0;
        self.emit(PlaybackEvent::PositionReset);
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl<M: MediaHandle> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.media.pause();
        self.media.clear_source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::DummyMedia;

    fn playable(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Artist", "Album")
            .with_preview(format!("https://cdn.example.com/{}.mp3", id))
            .with_duration(180)
    }

    fn controller() -> PlaybackController<DummyMedia> {
        PlaybackController::new(DummyMedia::default())
    }

    #[tokio::test]
    async fn new_controller_is_idle() {
        let controller = controller();
        assert_eq!(controller.status(), PlayerStatus::Idle);
        assert!(controller.queue().is_empty());
    }

    #[tokio::test]
    async fn play_points_media_at_preview() {
        let mut controller = controller();
        let outcome = controller.play(playable("a"), Vec::new()).await;

        assert_eq!(outcome, PlayOutcome::Started);
        assert_eq!(
            controller.media().source.as_deref(),
            Some("https://cdn.example.com/a.mp3")
        );
        assert!(controller.media().playing);
        assert_eq!(controller.duration(), 180.0);
    }

    #[tokio::test]
    async fn failed_media_play_reverts_flag() {
        let mut controller = controller();
        controller.media_mut().fail_next_play = true;

        let outcome = controller.play(playable("a"), Vec::new()).await;

        assert!(matches!(outcome, PlayOutcome::Failed(_)));
        assert!(!controller.is_playing());
        assert_eq!(controller.status(), PlayerStatus::Paused);
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[tokio::test]
    async fn ended_event_pauses_without_advancing() {
        let mut controller = controller();
        controller
            .play(playable("a"), vec![playable("a"), playable("b")])
            .await;

        controller.handle_media_event(MediaEvent::Ended);

        assert!(!controller.is_playing());
        assert_eq!(controller.current_track().unwrap().id, "a");
    }

    #[tokio::test]
    async fn media_clock_tracks_events() {
        let mut controller = controller();
        controller.play(playable("a"), Vec::new()).await;

        controller.handle_media_event(MediaEvent::LoadedMetadata(29.9));
        controller.handle_media_event(MediaEvent::TimeUpdate(12.0));

        assert_eq!(controller.duration(), 29.9);
        assert_eq!(controller.position(), 12.0);
    }

    #[tokio::test]
    async fn time_update_ignored_when_idle() {
        let mut controller = controller();
        controller.handle_media_event(MediaEvent::TimeUpdate(5.0));
        assert_eq!(controller.position(), 0.0);
    }

    #[tokio::test]
    async fn state_events_only_on_change() {
        let mut controller = controller();
        controller.play(playable("a"), Vec::new()).await;
        controller.drain_events();

        controller.pause();
        controller.pause();

        let state_changes = controller
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlaybackEvent::StateChanged { .. }))
            .count();
        assert_eq!(state_changes, 1);
    }
}
