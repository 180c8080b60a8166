use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error};

use super::model::{UserLibrary, WatchProgress};
use crate::common::clock::Clock;
use crate::infrastructure::storage::{KeyValueStore, app_state_key, load_json, save_json};

/// Per-user libraries, loaded from the store on first touch and written
/// back after every mutation.
pub struct LibraryRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    users: RwLock<HashMap<String, UserLibrary>>,
}

impl LibraryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            users: RwLock::new(HashMap::new()),
        }
    }

    async fn ensure_loaded(&self, user_id: &str) {
        if self.users.read().await.contains_key(user_id) {
            return;
        }

        let key = app_state_key(user_id);
        let library = match load_json::<UserLibrary>(self.store.as_ref(), &key).await {
            Ok(found) => found.unwrap_or_default(),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Error loading app state");
                UserLibrary::default()
            }
        };

        self.users
            .write()
            .await
            .entry(user_id.to_string())
            .or_insert(library);
    }

    pub async fn get(&self, user_id: &str) -> UserLibrary {
        self.ensure_loaded(user_id).await;
        self.users.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Applies `f` to the user's library and persists the result. The
    /// write lock is held until the store has the new snapshot, so writes
    /// land in the same order as the mutations.
    async fn update<R>(&self, user_id: &str, f: impl FnOnce(&mut UserLibrary) -> R) -> R {
        self.ensure_loaded(user_id).await;

        let mut users = self.users.write().await;
        let library = users.entry(user_id.to_string()).or_default();
        let result = f(library);

        let key = app_state_key(user_id);
        match save_json(self.store.as_ref(), &key, &*library).await {
            Ok(()) => debug!(user_id = %user_id, "App state saved"),
            Err(e) => error!(user_id = %user_id, error = %e, "Error saving app state"),
        }
        result
    }

    pub async fn toggle_like(&self, user_id: &str, video_id: &str) -> bool {
        self.update(user_id, |lib| lib.toggle_like(video_id)).await
    }

    pub async fn is_liked(&self, user_id: &str, video_id: &str) -> bool {
        self.get(user_id).await.is_liked(video_id)
    }

    pub async fn record_progress(&self, user_id: &str, video_id: &str, progress: f64) {
        let now = self.clock.now();
        self.update(user_id, |lib| lib.update_progress(video_id, progress, false, now))
            .await
    }

    pub async fn complete(&self, user_id: &str, video_id: &str) {
        let now = self.clock.now();
        self.update(user_id, |lib| lib.update_progress(video_id, 1.0, true, now))
            .await
    }

    pub async fn progress(&self, user_id: &str) -> Vec<WatchProgress> {
        self.get(user_id).await.watch_progress
    }

    pub async fn mark_landing_seen(&self, user_id: &str) {
        self.update(user_id, |lib| lib.has_seen_landing = true).await
    }
}
