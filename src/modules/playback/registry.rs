use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use super::device::RemoteDevice;
use super::session::WatchSession;

pub struct SessionEntry {
    pub user_id: String,
    pub session: WatchSession,
    pub device: Arc<RemoteDevice>,
    last_active: Instant,
}

impl SessionEntry {
    pub fn new(user_id: impl Into<String>, session: WatchSession, device: Arc<RemoteDevice>) -> Self {
        Self {
            user_id: user_id.into(),
            session,
            device,
            last_active: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

pub type SharedSession = Arc<Mutex<SessionEntry>>;

/// Live watch-sessions of this process, keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: SessionEntry) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(entry));
        self.sessions.write().await.insert(id, shared.clone());
        (id, shared)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Unregisters sessions nobody has touched for `idle`. Sessions whose
    /// lock is held are in use and stay. The caller tears the evicted ones
    /// down.
    pub async fn evict_idle(&self, idle: Duration) -> Vec<(Uuid, SharedSession)> {
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, shared)| {
                shared
                    .try_lock()
                    .is_ok_and(|entry| entry.last_active.elapsed() >= idle)
            })
            .map(|(id, _)| *id)
            .collect();

        expired
            .into_iter()
            .filter_map(|id| sessions.remove(&id).map(|shared| (id, shared)))
            .collect()
    }
}
