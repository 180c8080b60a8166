//! Watch-session lifecycle shared by every player screen.
//!
//! `Idle -> Loading -> Ready(Playing | Paused) -> TornDown`, with
//! fullscreen as an orthogonal flag. A load error parks the session in
//! `Failed` until the content is switched or the session torn down.
//! Device calls are best-effort: a failed play, unload or orientation
//! change is logged and the session carries on.

use std::sync::Arc;

use serde::Serialize;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::device::{MediaDevice, OrientationLock};
use super::model::{
    AutoplayMode, COMPLETION_THRESHOLD, ContentDescriptor, DEFERRED_AUTOPLAY_MILLIS,
    MIN_TRACKED_PROGRESS, Phase, PlayState, PlaybackContext, PlaybackTick, Platform, ResizeMode,
};
use super::progress::ProgressSink;
use crate::modules::content::media_url::normalize_video_url;
use crate::modules::content::model::Orientation;

/// One-shot autoplay per content selection.
#[derive(Debug, Default, Clone, Copy)]
struct AutoplayGuard {
    deadline: Option<Instant>,
    fired: bool,
}

impl AutoplayGuard {
    fn arm(&mut self, at: Instant) {
        self.deadline = Some(at);
        self.fired = false;
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some() && !self.fired
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct SessionSnapshot {
    pub content: ContentDescriptor,
    pub context: PlaybackContext,
    pub phase: Phase,
    pub play_state: PlayState,
    pub fullscreen: bool,
    pub resize_mode: ResizeMode,
    pub orientation_locked: bool,
    pub completed: bool,
    pub autoplay_pending: bool,
    /// Last fraction written to watch progress in this session.
    pub progress: Option<f64>,
    pub load_error: Option<String>,
}

pub struct WatchSession {
    content: ContentDescriptor,
    context: PlaybackContext,
    platform: Platform,
    media: Arc<dyn MediaDevice>,
    orientation: Arc<dyn OrientationLock>,
    progress: Arc<dyn ProgressSink>,
    phase: Phase,
    play_state: PlayState,
    fullscreen: bool,
    orientation_locked: bool,
    completed: bool,
    last_progress: Option<f64>,
    load_error: Option<String>,
    autoplay: AutoplayGuard,
}

impl WatchSession {
    pub fn new(
        content: ContentDescriptor,
        context: PlaybackContext,
        platform: Platform,
        media: Arc<dyn MediaDevice>,
        orientation: Arc<dyn OrientationLock>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            content,
            context,
            platform,
            media,
            orientation,
            progress,
            phase: Phase::Idle,
            play_state: PlayState::Paused,
            fullscreen: false,
            orientation_locked: false,
            completed: false,
            last_progress: None,
            load_error: None,
            autoplay: AutoplayGuard::default(),
        }
    }

    pub fn content(&self) -> &ContentDescriptor {
        &self.content
    }

    pub fn context(&self) -> PlaybackContext {
        self.context
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn resize_mode(&self) -> ResizeMode {
        if self.fullscreen || self.content.orientation == Orientation::Landscape {
            ResizeMode::Contain
        } else {
            ResizeMode::Cover
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            content: self.content.clone(),
            context: self.context,
            phase: self.phase,
            play_state: self.play_state,
            fullscreen: self.fullscreen,
            resize_mode: self.resize_mode(),
            orientation_locked: self.orientation_locked,
            completed: self.completed,
            autoplay_pending: self.autoplay.is_pending(),
            progress: self.last_progress,
            load_error: self.load_error.clone(),
        }
    }

    fn arm_autoplay(&mut self) {
        if self.context.autoplay_mode() == AutoplayMode::DeferredOnce {
            self.autoplay
                .arm(Instant::now() + Duration::from_millis(DEFERRED_AUTOPLAY_MILLIS));
        }
    }

    /// Mount: clear any orientation lock left by a previous screen and
    /// start loading. Callers consult the entitlement gate beforehand.
    pub async fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }

        if self.platform == Platform::Native {
            if let Err(e) = self.orientation.unlock().await {
                warn!(video_id = %self.content.id, error = %e, "Error resetting orientation");
            }
        }

        self.phase = Phase::Loading;
        self.play_state = PlayState::Paused;
        self.arm_autoplay();
        debug!(video_id = %self.content.id, context = ?self.context, "Watch session loading");
    }

    pub async fn handle_tick(&mut self, tick: PlaybackTick) {
        match self.phase {
            Phase::Idle | Phase::Failed | Phase::TornDown => {
                debug!(video_id = %self.content.id, phase = ?self.phase, "Ignoring tick");
                return;
            }
            Phase::Loading | Phase::Ready if !tick.is_loaded => {
                if let Some(error) = tick.error {
                    self.fail(&error);
                }
                return;
            }
            Phase::Loading => self.become_ready().await,
            Phase::Ready => {}
        }

        self.poll_autoplay().await;

        let ratio = tick.ratio();
        if tick.did_just_finish || ratio.is_some_and(|r| r >= COMPLETION_THRESHOLD) {
            self.complete().await;
            return;
        }

        match ratio {
            Some(r) if r > MIN_TRACKED_PROGRESS => {
                self.completed = false;
                self.last_progress = Some(r);
                self.progress.record(&self.content.id, r).await;
            }
            _ => {}
        }
    }

    fn fail(&mut self, reported: &str) {
        let message = normalize_video_url(&self.content.url).source.load_error();
        warn!(video_id = %self.content.id, error = %reported, "Error loading video");
        self.autoplay.cancel();
        self.phase = Phase::Failed;
        self.play_state = PlayState::Paused;
        self.load_error = Some(message.to_string());
    }

    async fn become_ready(&mut self) {
        self.phase = Phase::Ready;
        match self.context.autoplay_mode() {
            AutoplayMode::Immediate => match self.media.play().await {
                Ok(()) => self.play_state = PlayState::Playing,
                Err(e) => {
                    warn!(video_id = %self.content.id, error = %e, "Error starting playback");
                    self.play_state = PlayState::Paused;
                }
            },
            AutoplayMode::DeferredOnce => self.play_state = PlayState::Paused,
        }
        debug!(video_id = %self.content.id, play_state = ?self.play_state, "Watch session ready");
    }

    /// Fires the deferred autoplay once its delay has passed and the media
    /// is ready. Before that it stays pending.
    pub async fn poll_autoplay(&mut self) {
        if self.phase != Phase::Ready || !self.autoplay.is_pending() {
            return;
        }
        let Some(deadline) = self.autoplay.deadline else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }

        self.autoplay.fired = true;
        match self.media.play().await {
            Ok(()) => {
                self.play_state = PlayState::Playing;
                debug!(video_id = %self.content.id, "Autoplay started");
            }
            Err(e) => warn!(video_id = %self.content.id, error = %e, "Autoplay failed"),
        }
    }

    /// Seals the item as finished: drops its progress record once and
    /// parks the player in `Paused` for a replay.
    async fn complete(&mut self) {
        self.autoplay.cancel();
        self.play_state = PlayState::Paused;
        if self.completed {
            return;
        }

        self.completed = true;
        self.last_progress = None;
        self.progress.complete(&self.content.id).await;
        info!(video_id = %self.content.id, "Video completed");
    }

    /// User play/pause. Returns whether the state changed.
    pub async fn toggle(&mut self) -> bool {
        if self.phase != Phase::Ready {
            debug!(video_id = %self.content.id, phase = ?self.phase, "Toggle ignored");
            return false;
        }

        match self.media.is_loaded().await {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                warn!(video_id = %self.content.id, error = %e, "Error reading player status");
                return false;
            }
        }

        // A manual toggle takes over from a pending autoplay.
        self.autoplay.fired = true;

        let result = match self.play_state {
            PlayState::Playing => self.media.pause().await,
            PlayState::Paused => self.media.play().await,
        };

        match result {
            Ok(()) => {
                self.play_state = match self.play_state {
                    PlayState::Playing => PlayState::Paused,
                    PlayState::Paused => PlayState::Playing,
                };
                true
            }
            Err(e) => {
                warn!(video_id = %self.content.id, error = %e, "Error toggling playback");
                false
            }
        }
    }

    pub async fn enter_fullscreen(&mut self) {
        if self.fullscreen || self.phase == Phase::TornDown {
            return;
        }
        self.fullscreen = true;

        if self.platform != Platform::Native {
            debug!("Web platform, skipping orientation lock");
            return;
        }
        if self.content.orientation != Orientation::Landscape {
            return;
        }

        match self.orientation.lock_landscape().await {
            Ok(()) => {
                self.orientation_locked = true;
                debug!(video_id = %self.content.id, "Orientation locked to landscape");
            }
            Err(e) => warn!(video_id = %self.content.id, error = %e, "Error locking orientation"),
        }
    }

    pub async fn exit_fullscreen(&mut self) {
        if !self.fullscreen {
            return;
        }
        self.fullscreen = false;
        self.release_orientation().await;
    }

    async fn release_orientation(&mut self) {
        if !self.orientation_locked {
            return;
        }
        match self.orientation.unlock().await {
            Ok(()) => self.orientation_locked = false,
            Err(e) => warn!(video_id = %self.content.id, error = %e, "Error unlocking orientation"),
        }
    }

    async fn unload_media(&self) {
        match self.media.is_loaded().await {
            Ok(true) => {
                if let Err(e) = self.media.unload().await {
                    warn!(video_id = %self.content.id, error = %e, "Error unloading video");
                }
            }
            Ok(false) => {}
            Err(e) => warn!(video_id = %self.content.id, error = %e, "Error reading player status"),
        }
    }

    /// Swaps in another item and restarts from `Loading`.
    pub async fn switch_content(&mut self, content: ContentDescriptor) {
        if self.phase == Phase::TornDown {
            return;
        }

        self.autoplay.cancel();
        self.phase = Phase::Loading;
        self.play_state = PlayState::Paused;
        self.unload_media().await;

        info!(from = %self.content.id, to = %content.id, "Switching content");
        self.content = content;
        self.completed = false;
        self.last_progress = None;
        self.load_error = None;
        self.arm_autoplay();
    }

    /// Terminal. Each step runs even when an earlier one fails.
    pub async fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }

        self.autoplay.cancel();
        self.unload_media().await;
        self.release_orientation().await;
        self.phase = Phase::TornDown;
        self.play_state = PlayState::Paused;
        debug!(video_id = %self.content.id, "Watch session torn down");
    }
}
