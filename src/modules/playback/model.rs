use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::content::model::{Orientation, PlayableItem};

/// Lower bound below which progress is not stored.
pub const MIN_TRACKED_PROGRESS: f64 = 0.05;
/// Ratio at which a video counts as finished.
pub const COMPLETION_THRESHOLD: f64 = 0.95;
/// Delay before the one-shot autoplay on detail screens.
pub const DEFERRED_AUTOPLAY_MILLIS: u64 = 300;
/// A session nobody has touched for this long is torn down.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    /// The player reported a load error. Only a switch or teardown leaves it.
    Failed,
    TornDown,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Playing,
    Paused,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Fill the frame, cropping as needed.
    Cover,
    /// Fit inside the frame.
    Contain,
}

/// Where a session was opened from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackContext {
    /// Full-bleed home video, starts playing as soon as it loads.
    Home,
    Movie,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayMode {
    Immediate,
    DeferredOnce,
}

impl PlaybackContext {
    pub fn autoplay_mode(self) -> AutoplayMode {
        match self {
            PlaybackContext::Home => AutoplayMode::Immediate,
            PlaybackContext::Movie | PlaybackContext::Series => AutoplayMode::DeferredOnce,
        }
    }

    pub fn allows_episode_switch(self) -> bool {
        self == PlaybackContext::Series
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Web,
    #[default]
    Native,
}

/// One status update from the device's player.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, ToSchema)]
pub struct PlaybackTick {
    pub is_loaded: bool,
    pub position_millis: Option<u64>,
    pub duration_millis: Option<u64>,
    #[serde(default)]
    pub did_just_finish: bool,
    /// Set when the player gave up loading the source.
    #[serde(default)]
    pub error: Option<String>,
}

impl PlaybackTick {
    /// `position / duration` when both are reported and non-zero.
    pub fn ratio(&self) -> Option<f64> {
        match (self.position_millis, self.duration_millis) {
            (Some(position), Some(duration)) if position > 0 && duration > 0 => {
                Some((position as f64 / duration as f64).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

/// What a session plays: the playable URL and its intrinsic orientation.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct ContentDescriptor {
    pub id: String,
    pub title: String,
    pub url: String,
    pub orientation: Orientation,
    pub series_id: Option<String>,
}

impl From<PlayableItem> for ContentDescriptor {
    fn from(item: PlayableItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            url: item.video_url,
            orientation: item.orientation,
            series_id: item.series_id,
        }
    }
}
