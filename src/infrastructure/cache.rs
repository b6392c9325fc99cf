use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

/// In-memory report cache keyed by `username-year`, with a fixed TTL.
/// Process-local only; reports are rebuilt after a restart.
#[derive(Debug)]
pub struct ReportCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedReport>>,
}

#[derive(Debug, Clone)]
struct CachedReport {
    value: Arc<Value>,
    inserted_at: Instant,
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache_key(username: &str, year: i32) -> String {
        format!("{username}-{year}")
    }

    /// Look up a cached report, ignoring entries past their TTL.
    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let cached = entries.get(key)?;
        if cached.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(Arc::clone(&cached.value))
    }

    pub fn insert(&self, key: String, value: Arc<Value>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            CachedReport {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry and return how many were removed.
    pub fn prune_expired(&self) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, cached| cached.inserted_at.elapsed() <= self.ttl);
        before - entries.len()
    }
}

/// Share-id to report-envelope store backing `/api/share`. Entries never
/// expire while the process lives.
#[derive(Debug, Default)]
pub struct ShareStore {
    entries: Mutex<HashMap<String, Arc<Value>>>,
}

impl ShareStore {
    pub fn get(&self, share_id: &str) -> Option<Arc<Value>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(share_id).map(Arc::clone)
    }

    pub fn contains(&self, share_id: &str) -> bool {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(share_id)
    }

    pub fn insert(&self, share_id: String, value: Arc<Value>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(share_id, value);
    }
}
