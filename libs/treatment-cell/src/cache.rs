use tracing::{debug, warn};
use uuid::Uuid;

use shared_utils::{keys, LocalStore};

use crate::models::TreatmentPlan;

/// Legacy per-user plan cache under `treatment_plan_<user-id>`.
///
/// This duplicates server-held data and is DEPRECATED: it is read only
/// as a fallback when the authoritative fetch is unavailable, it is
/// invalidated whenever a server fetch succeeds, and nothing writes it
/// anymore.
pub struct PlanCache {
    storage: LocalStore,
}

impl PlanCache {
    pub fn new(storage: LocalStore) -> Self {
        Self { storage }
    }

    /// Fallback read. Tries the exact per-user key first, then the
    /// legacy linear scan over all plan-cache entries looking for a
    /// matching patient id.
    pub fn fallback_plan(&self, user_id: Uuid) -> Option<TreatmentPlan> {
        if let Some(plan) = self.storage.get_as::<TreatmentPlan>(&keys::plan_cache(user_id)) {
            warn!("Serving treatment plan for {} from the deprecated local cache", user_id);
            return Some(plan);
        }

        for key in self.storage.keys_with_prefix(keys::PLAN_CACHE_PREFIX) {
            if let Some(plan) = self.storage.get_as::<TreatmentPlan>(&key) {
                if plan.patient_id == user_id {
                    warn!("Serving treatment plan for {} from legacy cache entry {}", user_id, key);
                    return Some(plan);
                }
            }
        }

        None
    }

    /// Called after every successful authoritative fetch.
    pub fn invalidate(&self, user_id: Uuid) {
        if self.storage.remove(&keys::plan_cache(user_id)) {
            debug!("Invalidated cached treatment plan for {}", user_id);
        }
    }
}
