use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::generator::{RandomSymbols, SymbolSource, draw_code};
use super::model::{DiscountCode, DiscountValidation, Redemption};
use crate::common::clock::Clock;
use crate::infrastructure::storage::{DISCOUNT_CODES_KEY, KeyValueStore, load_json, save_json};

/// Upper bound on redraws after collisions before giving up.
const MAX_DRAWS: usize = 10_000;

/// Single-use discount codes, newest first, written through to the
/// key-value store after every mutation.
pub struct DiscountRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    codes: RwLock<Vec<DiscountCode>>,
    symbols: Mutex<Box<dyn SymbolSource>>,
}

impl DiscountRepository {
    pub async fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let codes = match load_json::<Vec<DiscountCode>>(store.as_ref(), DISCOUNT_CODES_KEY).await {
            Ok(Some(codes)) => codes,
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Error loading discount codes");
                Vec::new()
            }
        };

        info!(codes = codes.len(), "Discount codes loaded");

        Self {
            store,
            clock,
            codes: RwLock::new(codes),
            symbols: Mutex::new(Box::new(RandomSymbols)),
        }
    }

    pub fn with_symbols(mut self, source: impl SymbolSource + 'static) -> Self {
        self.symbols = Mutex::new(Box::new(source));
        self
    }

    async fn persist(&self) {
        let codes = self.codes.read().await;
        match save_json(self.store.as_ref(), DISCOUNT_CODES_KEY, codes.as_slice()).await {
            Ok(()) => debug!("Discount codes saved"),
            Err(e) => error!(error = %e, "Error saving discount codes"),
        }
    }

    pub async fn list(&self) -> Vec<DiscountCode> {
        self.codes.read().await.clone()
    }

    /// Mints a code that differs from every stored one, used or not.
    /// `None` only when the source keeps colliding.
    pub async fn generate(&self, discount_percentage: u8) -> Option<DiscountCode> {
        let record = {
            let mut codes = self.codes.write().await;
            let code = {
                let mut symbols = self.symbols.lock().unwrap_or_else(PoisonError::into_inner);
                (0..MAX_DRAWS)
                    .map(|_| draw_code(&mut **symbols))
                    .find(|candidate| !codes.iter().any(|c| &c.code == candidate))
            };

            let Some(code) = code else {
                warn!(attempts = MAX_DRAWS, "Could not draw an unused discount code");
                return None;
            };

            let record = DiscountCode {
                code,
                discount_percentage,
                created_at: self.clock.now(),
                redemption: Redemption::Unused,
            };
            codes.insert(0, record.clone());
            record
        };

        info!(code = %record.code, discount = discount_percentage, "Discount code generated");
        self.persist().await;
        Some(record)
    }

    /// Read-only; repeated calls never change state.
    pub async fn validate(&self, code: &str) -> DiscountValidation {
        let codes = self.codes.read().await;
        match codes.iter().find(|c| c.code.eq_ignore_ascii_case(code)) {
            None => DiscountValidation::invalid(),
            Some(c) if c.is_used() => DiscountValidation::already_used(),
            Some(c) => DiscountValidation::valid(c.discount_percentage),
        }
    }

    /// First redemption wins. Returns whether this call consumed the code.
    pub async fn mark_used(&self, code: &str, user_id: &str) -> bool {
        {
            let mut codes = self.codes.write().await;
            let Some(record) = codes.iter_mut().find(|c| c.code.eq_ignore_ascii_case(code)) else {
                return false;
            };
            if record.is_used() {
                return false;
            }
            record.redemption = Redemption::Used {
                used_at: self.clock.now(),
                used_by: user_id.to_string(),
            };
        }

        info!(code = %code, user_id = %user_id, "Discount code redeemed");
        self.persist().await;
        true
    }

    pub async fn delete(&self, code: &str) -> bool {
        let removed = {
            let mut codes = self.codes.write().await;
            let before = codes.len();
            codes.retain(|c| !c.code.eq_ignore_ascii_case(code));
            codes.len() != before
        };

        if removed {
            info!(code = %code, "Discount code deleted");
            self.persist().await;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::FixedClock;
    use crate::infrastructure::storage::MemoryStore;
    use crate::modules::discount::generator::CODE_ALPHABET;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use time::macros::datetime;

    /// Replays the given codes in order, cycling at the end.
    struct ScriptedSymbols {
        positions: Vec<usize>,
        cursor: usize,
    }

    impl ScriptedSymbols {
        fn codes(codes: &[&str]) -> Self {
            let positions = codes
                .iter()
                .flat_map(|c| c.bytes())
                .map(|b| CODE_ALPHABET.iter().position(|a| *a == b).unwrap())
                .collect();
            Self { positions, cursor: 0 }
        }
    }

    impl SymbolSource for ScriptedSymbols {
        fn pick(&mut self, _len: usize) -> usize {
            let idx = self.positions[self.cursor % self.positions.len()];
            self.cursor += 1;
            idx
        }
    }

    /// Only the first two alphabet symbols: 64 possible codes.
    struct LowEntropy(StdRng);

    impl SymbolSource for LowEntropy {
        fn pick(&mut self, _len: usize) -> usize {
            self.0.random_range(0..2)
        }
    }

    async fn repository() -> (DiscountRepository, Arc<MemoryStore>, Arc<FixedClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(datetime!(2025-02-01 10:00 UTC)));
        let repo = DiscountRepository::load(store.clone(), clock.clone()).await;
        (repo, store, clock)
    }

    #[tokio::test]
    async fn collision_triggers_redraw() {
        let (repo, _, _) = repository().await;
        let repo = repo.with_symbols(ScriptedSymbols::codes(&["AAAAAA", "AAAAAA", "BBBBBB"]));

        let first = repo.generate(10).await.unwrap();
        let second = repo.generate(20).await.unwrap();

        assert_eq!(first.code, "AAAAAA");
        assert_eq!(second.code, "BBBBBB");
        let listed: Vec<_> = repo.list().await.into_iter().map(|c| c.code).collect();
        assert_eq!(listed, vec!["BBBBBB", "AAAAAA"]);
    }

    #[tokio::test]
    async fn low_entropy_source_never_repeats_a_code() {
        let (repo, _, _) = repository().await;
        let repo = repo.with_symbols(LowEntropy(StdRng::seed_from_u64(7)));

        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let code = repo.generate(5).await.unwrap();
            assert!(seen.insert(code.code));
        }
        assert!(repo.generate(5).await.is_none());
    }

    #[tokio::test]
    async fn used_codes_still_block_reuse() {
        let (repo, _, _) = repository().await;
        let repo = repo.with_symbols(ScriptedSymbols::codes(&["CCCCCC", "CCCCCC", "DDDDDD"]));

        repo.generate(10).await.unwrap();
        assert!(repo.mark_used("CCCCCC", "user-1").await);
        assert_eq!(repo.generate(10).await.unwrap().code, "DDDDDD");
    }

    #[tokio::test]
    async fn validate_then_mark_used() {
        let (repo, _, clock) = repository().await;
        let repo = repo.with_symbols(ScriptedSymbols::codes(&["SAVE25"]));
        repo.generate(25).await.unwrap();

        assert_eq!(repo.validate("nope42").await, DiscountValidation::invalid());
        for _ in 0..3 {
            assert_eq!(repo.validate("save25").await, DiscountValidation::valid(25));
        }

        clock.advance(time::Duration::hours(1));
        assert!(repo.mark_used("save25", "user-1").await);
        assert!(!repo.mark_used("SAVE25", "user-2").await);

        assert_eq!(repo.validate("SAVE25").await, DiscountValidation::already_used());
        let stored = repo.list().await.remove(0);
        assert_eq!(
            stored.redemption,
            Redemption::Used {
                used_at: datetime!(2025-02-01 11:00 UTC),
                used_by: "user-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn codes_survive_reload_and_delete() {
        let (repo, store, clock) = repository().await;
        let repo = repo.with_symbols(ScriptedSymbols::codes(&["KEEP22", "DRAP33"]));
        repo.generate(10).await.unwrap();
        repo.generate(30).await.unwrap();

        assert!(repo.delete("drap33").await);
        assert!(!repo.delete("DRAP33").await);

        let reloaded = DiscountRepository::load(store, clock).await;
        let codes: Vec<_> = reloaded.list().await.into_iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["KEEP22"]);
    }
}
