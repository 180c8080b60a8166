use std::collections::HashMap;
use std::sync::Arc;

use time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::checkout::PendingCheckout;
use super::model::{Entitlement, PaymentPlatform, PlanId, SubscriptionRecord, SubscriptionStatus};
use crate::common::clock::Clock;
use crate::infrastructure::storage::{KeyValueStore, load_json, save_json, subscription_key};

/// Subscription records per user plus the checkouts still waiting for a
/// payment signal. Checkouts live in memory only.
pub struct SubscriptionRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    records: RwLock<HashMap<String, Option<SubscriptionRecord>>>,
    checkouts: RwLock<HashMap<Uuid, PendingCheckout>>,
}

impl SubscriptionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            records: RwLock::new(HashMap::new()),
            checkouts: RwLock::new(HashMap::new()),
        }
    }

    async fn load(&self, user_id: &str) -> Option<SubscriptionRecord> {
        if let Some(cached) = self.records.read().await.get(user_id) {
            return cached.clone();
        }

        let record = match load_json::<SubscriptionRecord>(self.store.as_ref(), &subscription_key(user_id)).await {
            Ok(found) => found,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Error loading subscription");
                None
            }
        };

        self.records
            .write()
            .await
            .entry(user_id.to_string())
            .or_insert(record)
            .clone()
    }

    /// Writes the record through to the store. The map lock is held for
    /// the write so saves for one user cannot land out of order.
    async fn save(&self, record: SubscriptionRecord) {
        let mut records = self.records.write().await;
        let key = subscription_key(&record.user_id);
        if let Err(e) = save_json(self.store.as_ref(), &key, &record).await {
            error!(user_id = %record.user_id, error = %e, "Error saving subscription");
        } else {
            debug!(user_id = %record.user_id, "Subscription saved");
        }
        records.insert(record.user_id.clone(), Some(record));
    }

    /// Current record with lazy expiry applied. A record that has just
    /// lapsed is flipped to `expired` and written back.
    pub async fn current(&self, user_id: &str) -> Option<SubscriptionRecord> {
        let mut record = self.load(user_id).await?;
        let now = self.clock.now();

        let mut entitlement = record.entitlement();
        let was_active = entitlement.is_entitled();
        if was_active && !entitlement.check_and_expire(now) {
            info!(user_id = %user_id, expiry = %record.expiry_date, "Subscription expired");
            record.status = SubscriptionStatus::Expired;
            record.updated_at = now;
            self.save(record.clone()).await;
        }
        Some(record)
    }

    pub async fn entitlement(&self, user_id: &str) -> Entitlement {
        self.current(user_id)
            .await
            .map(|r| r.entitlement())
            .unwrap_or_default()
    }

    /// Starts (or replaces) the user's subscription from now for the
    /// plan's duration.
    pub async fn activate(
        &self,
        user_id: &str,
        plan: PlanId,
        platform: PaymentPlatform,
        transaction_id: String,
    ) -> SubscriptionRecord {
        let now = self.clock.now();
        let mut entitlement = Entitlement::default();
        entitlement.activate(now + plan.plan().duration());

        let record = SubscriptionRecord {
            user_id: user_id.to_string(),
            payment_method: platform,
            transaction_id,
            plan,
            status: SubscriptionStatus::Active,
            start_date: now,
            expiry_date: entitlement.expires_at().unwrap_or(now),
            updated_at: now,
        };

        info!(user_id = %user_id, plan = ?plan, expiry = %record.expiry_date, "Subscription activated");
        self.save(record.clone()).await;
        record
    }

    // --- CHECKOUTS ---

    pub async fn insert_checkout(&self, checkout: PendingCheckout) {
        self.checkouts.write().await.insert(checkout.id, checkout);
    }

    pub async fn checkout(&self, id: Uuid) -> Option<PendingCheckout> {
        self.checkouts.read().await.get(&id).cloned()
    }

    /// Removes and returns the checkout; only one caller can resolve it.
    pub async fn take_checkout(&self, id: Uuid) -> Option<PendingCheckout> {
        self.checkouts.write().await.remove(&id)
    }

    /// Forgets checkouts whose web view was abandoned more than `max_age`
    /// ago. Returns how many were dropped.
    pub async fn evict_stale_checkouts(&self, max_age: Duration) -> usize {
        let cutoff = self.clock.now() - max_age;
        let mut checkouts = self.checkouts.write().await;
        let before = checkouts.len();
        checkouts.retain(|_, checkout| checkout.created_at > cutoff);
        let evicted = before - checkouts.len();
        if evicted > 0 {
            info!(evicted, "Abandoned checkouts evicted");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::FixedClock;
    use crate::infrastructure::storage::MemoryStore;
    use crate::infrastructure::storage::memory::SlowFirstWrite;
    use time::macros::datetime;

    fn repository(store: Arc<MemoryStore>, clock: Arc<FixedClock>) -> SubscriptionRepository {
        SubscriptionRepository::new(store, clock)
    }

    #[tokio::test]
    async fn no_record_means_no_entitlement() {
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        let repo = repository(Arc::new(MemoryStore::new()), clock);
        assert!(!repo.entitlement("alice").await.is_entitled());
        assert!(repo.current("alice").await.is_none());
    }

    #[tokio::test]
    async fn activation_lasts_for_the_plan_then_expires_lazily() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        let repo = repository(store.clone(), clock.clone());

        let record = repo
            .activate("alice", PlanId::Monthly, PaymentPlatform::Paypal, "I-1".to_string())
            .await;
        assert_eq!(record.expiry_date, datetime!(2025-03-03 10:00 UTC));
        assert!(repo.entitlement("alice").await.is_entitled());

        clock.advance(Duration::days(31));
        assert!(!repo.entitlement("alice").await.is_entitled());

        let stored: SubscriptionRecord = load_json(store.as_ref(), "@subscription_data_alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Expired);
        assert_eq!(stored.updated_at, datetime!(2025-03-04 10:00 UTC));

        clock.advance(Duration::days(1));
        let again = repo.current("alice").await.unwrap();
        assert_eq!(again.updated_at, datetime!(2025-03-04 10:00 UTC));
    }

    #[tokio::test]
    async fn record_survives_restart() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        repository(store.clone(), clock.clone())
            .activate("bob", PlanId::Yearly, PaymentPlatform::Mpesa, "MP-7".to_string())
            .await;

        let reloaded = repository(store, clock);
        let record = reloaded.current("bob").await.unwrap();
        assert_eq!(record.transaction_id, "MP-7");
        assert_eq!(record.payment_method, PaymentPlatform::Mpesa);
        assert!(record.entitlement().is_entitled());
    }

    #[tokio::test]
    async fn overlapping_saves_keep_store_in_step() {
        let store = Arc::new(SlowFirstWrite::new());
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        let repo = Arc::new(SubscriptionRepository::new(store.clone(), clock));

        let first = tokio::spawn({
            let repo = repo.clone();
            async move {
                repo.activate("alice", PlanId::Monthly, PaymentPlatform::Paypal, "I-1".to_string())
                    .await
            }
        });
        tokio::task::yield_now().await;
        let second = tokio::spawn({
            let repo = repo.clone();
            async move {
                repo.activate("alice", PlanId::Yearly, PaymentPlatform::Mpesa, "MP-2".to_string())
                    .await
            }
        });
        first.await.unwrap();
        second.await.unwrap();

        let in_memory = repo.current("alice").await.unwrap();
        let stored: SubscriptionRecord = load_json(store.as_ref(), "@subscription_data_alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, in_memory);
    }

    #[tokio::test]
    async fn abandoned_checkouts_are_evicted() {
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        let repo = repository(Arc::new(MemoryStore::new()), clock.clone());

        let checkout = |id: Uuid| PendingCheckout {
            id,
            user_id: "alice".to_string(),
            plan: PlanId::Monthly,
            platform: PaymentPlatform::Paypal,
            discount_code: None,
            amount: 499.0,
            created_at: clock.now(),
        };
        let old = Uuid::new_v4();
        repo.insert_checkout(checkout(old)).await;

        clock.advance(Duration::minutes(45));
        let fresh = Uuid::new_v4();
        repo.insert_checkout(checkout(fresh)).await;

        clock.advance(Duration::minutes(20));
        assert_eq!(repo.evict_stale_checkouts(Duration::hours(1)).await, 1);
        assert!(repo.checkout(old).await.is_none());
        assert!(repo.checkout(fresh).await.is_some());
    }
}
