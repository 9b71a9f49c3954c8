//! Integration test support for Shopdeck.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdeck-integration-tests
//! ```
//!
//! The tests drive whole banner-ordering sessions against [`MemoryBannerStore`],
//! an in-process stand-in for the console API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Once, PoisonError};

use shopdeck_admin::models::{BannerRecord, RankAssignment};
use shopdeck_admin::services::{BannerStore, StoreError};
use shopdeck_core::TenantId;

/// In-memory banner store keyed by tenant.
///
/// Saved orders are applied to the stored records (as the console API would)
/// and also kept in a log for assertions.
#[derive(Debug, Default)]
pub struct MemoryBannerStore {
    tenants: Mutex<HashMap<TenantId, Vec<BannerRecord>>>,
    saves: Mutex<Vec<(TenantId, Vec<RankAssignment>)>>,
    fail_saves: AtomicBool,
}

impl MemoryBannerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant from a JSON array shaped like the console API's
    /// banner list response.
    ///
    /// # Panics
    ///
    /// Panics if the fixture is not valid banner JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_tenant_json(self, tenant: TenantId, json: &str) -> Self {
        let records: Vec<BannerRecord> =
            serde_json::from_str(json).expect("invalid banner fixture");
        self.tenants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tenant, records);
        self
    }

    /// Make every subsequent save fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Every successful save, oldest first.
    #[must_use]
    pub fn saves(&self) -> Vec<(TenantId, Vec<RankAssignment>)> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BannerStore for MemoryBannerStore {
    async fn load_banners(&self, tenant: TenantId) -> Result<Vec<BannerRecord>, StoreError> {
        self.tenants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tenant)
            .cloned()
            .ok_or(StoreError::NotFound(tenant))
    }

    async fn save_order(
        &self,
        tenant: TenantId,
        order: &[RankAssignment],
    ) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Request("503 Service Unavailable".to_string()));
        }

        let mut tenants = self.tenants.lock().unwrap_or_else(PoisonError::into_inner);
        let records = tenants
            .get_mut(&tenant)
            .ok_or(StoreError::NotFound(tenant))?;
        for record in records.iter_mut() {
            let rank = order
                .iter()
                .find(|assignment| assignment.id == record.id)
                .and_then(|assignment| u32::try_from(assignment.rank.get()).ok());
            record.stored_rank = rank;
        }
        drop(tenants);

        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((tenant, order.to_vec()));
        Ok(())
    }
}

/// Install a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "shopdeck_admin=debug".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Three banners, A/B/C, with ids 1/2/3 and stored ranks in that order.
pub const ABC_FIXTURE: &str = r#"[
    {"id": 1, "display_name": "A", "rank": 1, "images": [{"url": "https://cdn.shopdeck.test/a-1.png"}]},
    {"id": 2, "display_name": "B", "rank": 2, "images": [{"url": "https://cdn.shopdeck.test/b-1.png", "alt_text": "Spring"}]},
    {"id": 3, "display_name": "C", "rank": 3, "images": []}
]"#;
