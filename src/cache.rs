//! Folder listing cache
//!
//! Listings are served from memory until `stale_time` passes or the folder
//! is invalidated by a mutation. Invalidations are published as
//! `cache-updated` so views can refetch.

use crate::api::ReadFolderData;
use crate::events::{self, SharedSink, CACHE_UPDATED};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheUpdatedPayload {
    pub action: String,
    pub affected_keys: Vec<String>,
}

struct CachedListing {
    data: ReadFolderData,
    fetched_at: Instant,
}

#[derive(Clone)]
pub struct FolderCache {
    entries: Arc<Mutex<HashMap<String, CachedListing>>>,
    stale_time: Duration,
    events: SharedSink,
}

impl FolderCache {
    pub fn new(stale_time: Duration, events: SharedSink) -> Self {
        FolderCache {
            entries: Arc::new(Mutex::new(HashMap::new())),
            stale_time,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedListing>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached listing, if one exists and is younger than the stale time
    pub fn get_fresh(&self, folder_key: &str) -> Option<ReadFolderData> {
        self.lock()
            .get(folder_key)
            .filter(|cached| cached.fetched_at.elapsed() < self.stale_time)
            .map(|cached| cached.data.clone())
    }

    pub fn insert(&self, folder_key: &str, data: ReadFolderData) {
        self.lock().insert(
            folder_key.to_string(),
            CachedListing {
                data,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn contains(&self, folder_key: &str) -> bool {
        self.lock().contains_key(folder_key)
    }

    /// Drop the listings of the given folders
    pub fn invalidate(&self, folder_keys: &[&str]) {
        {
            let mut entries = self.lock();
            for key in folder_keys {
                entries.remove(*key);
            }
        }
        log::debug!("Invalidated folder cache for {:?}", folder_keys);

        events::emit(
            self.events.as_ref(),
            CACHE_UPDATED,
            &CacheUpdatedPayload {
                action: "invalidate".to_string(),
                affected_keys: folder_keys.iter().map(|k| k.to_string()).collect(),
            },
        );
    }
}
