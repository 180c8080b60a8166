use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct WatchProgress {
    pub video_id: String,
    /// Fraction of the video watched, in `0..=1`.
    pub progress: f64,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_watched: OffsetDateTime,
    pub completed: bool,
}

/// Per-user app state: likes, progress records and onboarding flags.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct UserLibrary {
    /// Oldest like first.
    pub liked_video_ids: Vec<String>,
    pub watch_progress: Vec<WatchProgress>,
    pub has_seen_landing: bool,
}

impl UserLibrary {
    /// Flips the like and returns the new state.
    pub fn toggle_like(&mut self, video_id: &str) -> bool {
        if let Some(pos) = self.liked_video_ids.iter().position(|id| id == video_id) {
            self.liked_video_ids.remove(pos);
            false
        } else {
            self.liked_video_ids.push(video_id.to_string());
            true
        }
    }

    pub fn is_liked(&self, video_id: &str) -> bool {
        self.liked_video_ids.iter().any(|id| id == video_id)
    }

    /// Upserts the record, or drops it entirely once the video is completed.
    pub fn update_progress(
        &mut self,
        video_id: &str,
        progress: f64,
        completed: bool,
        now: OffsetDateTime,
    ) {
        if completed {
            self.watch_progress.retain(|p| p.video_id != video_id);
            return;
        }

        let progress = progress.clamp(0.0, 1.0);
        match self.watch_progress.iter_mut().find(|p| p.video_id == video_id) {
            Some(existing) => {
                existing.progress = progress;
                existing.last_watched = now;
                existing.completed = false;
            }
            None => self.watch_progress.push(WatchProgress {
                video_id: video_id.to_string(),
                progress,
                last_watched: now,
                completed: false,
            }),
        }
    }

    pub fn progress_for(&self, video_id: &str) -> Option<&WatchProgress> {
        self.watch_progress.iter().find(|p| p.video_id == video_id)
    }

    /// Unfinished records, most recently watched first.
    pub fn continue_watching(&self) -> Vec<&WatchProgress> {
        let mut records: Vec<_> = self.watch_progress.iter().filter(|p| !p.completed).collect();
        records.sort_by(|a, b| b.last_watched.cmp(&a.last_watched));
        records
    }
}
