use std::sync::Arc;

use crate::common::clock::Clock;
use crate::config::settings::AppConfig;
use crate::infrastructure::storage::KeyValueStore;
use crate::modules::content::repository::ContentRepository;
use crate::modules::discount::repository::DiscountRepository;
use crate::modules::library::repository::LibraryRepository;
use crate::modules::playback::registry::SessionRegistry;
use crate::modules::subscription::repository::SubscriptionRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub content: Arc<ContentRepository>,
    pub discounts: Arc<DiscountRepository>,
    pub library: Arc<LibraryRepository>,
    pub subscriptions: Arc<SubscriptionRepository>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Loads the persisted collections from `store` and wires every
    /// repository to the same store and clock.
    pub async fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let content = ContentRepository::load(store.clone(), clock.clone()).await;
        let discounts = DiscountRepository::load(store.clone(), clock.clone()).await;

        Self {
            config,
            content: Arc::new(content),
            discounts: Arc::new(discounts),
            library: Arc::new(LibraryRepository::new(store.clone(), clock.clone())),
            subscriptions: Arc::new(SubscriptionRepository::new(store, clock.clone())),
            sessions: Arc::new(SessionRegistry::new()),
            clock,
        }
    }
}
