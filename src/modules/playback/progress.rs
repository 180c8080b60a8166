use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::library::repository::LibraryRepository;

/// Where a session reports watch progress.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn record(&self, video_id: &str, progress: f64);
    /// Drops the record for a finished video.
    async fn complete(&self, video_id: &str);
}

/// Writes progress into one user's library.
pub struct LibraryProgress {
    library: Arc<LibraryRepository>,
    user_id: String,
}

impl LibraryProgress {
    pub fn new(library: Arc<LibraryRepository>, user_id: impl Into<String>) -> Self {
        Self {
            library,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl ProgressSink for LibraryProgress {
    async fn record(&self, video_id: &str, progress: f64) {
        self.library.record_progress(&self.user_id, video_id, progress).await
    }

    async fn complete(&self, video_id: &str) {
        self.library.complete(&self.user_id, video_id).await
    }
}
