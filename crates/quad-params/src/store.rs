use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;

use crate::{validate_update, ParamError, ParamValue, Params};

#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    /// Merges applied since the store was created.
    pub merges: u64,
    pub last_merge: Option<OffsetDateTime>,
}

#[derive(Debug, Default)]
struct Inner {
    params: Params,
    stats: StoreStats,
}

/// Process-wide parameters shared between the control loop (reader) and
/// the parameter listener (writer).
///
/// Every operation takes the lock once, so a reader sees each merge
/// either completely or not at all.
#[derive(Debug, Default)]
pub struct ParamStore {
    inner: Mutex<Inner>,
}

impl ParamStore {
    pub fn new(params: Params) -> Self {
        Self { inner: Mutex::new(Inner { params, stats: StoreStats::default() }) }
    }

    // a panic while holding the lock cannot leave a half-written map behind
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, name: &str, default: ParamValue) -> ParamValue {
        self.lock().params.get_or(name, default)
    }

    pub fn snapshot(&self) -> Params {
        self.lock().params.clone()
    }

    pub fn stats(&self) -> StoreStats {
        self.lock().stats.clone()
    }

    /// Apply all entries under one lock. Last write wins per key.
    pub fn merge<I>(&self, update: I)
    where
        I: IntoIterator<Item = (String, ParamValue)>,
    {
        let mut inner = self.lock();
        inner.params.extend(update);
        inner.stats.merges += 1;
        inner.stats.last_merge = Some(OffsetDateTime::now_utc());
    }

    /// Validate a single `{name, value}` pair and merge it. On error the
    /// store is left untouched.
    pub fn apply_update(&self, name: &str, value: &Value) -> Result<ParamValue, ParamError> {
        let checked = validate_update(name, value)?;
        self.merge([(name.to_string(), checked.clone())]);
        info!("param update: {} = {}", name, checked);
        Ok(checked)
    }
}
