//! Transfer progress tracker
//!
//! Keyed by transfer identifier (`"{folderKey}-{fileName}"` for uploads, the
//! file key for downloads). An entry exists only while its transfer is in
//! flight; the transfer code removes it on both success and failure.

use crate::events::{emit, SharedSink, PROGRESS_REMOVED, PROGRESS_UPDATED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Upload,
    Download,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub loaded: u64,
    pub total: u64,
    pub started_at: i64,
}

impl ProgressEntry {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        std::cmp::min(
            ((self.loaded as f64 / self.total as f64) * 100.0) as u32,
            100,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
struct ProgressRemoved {
    key: String,
}

#[derive(Clone)]
pub struct ProgressStore {
    entries: Arc<Mutex<HashMap<String, ProgressEntry>>>,
    events: SharedSink,
}

impl ProgressStore {
    pub fn new(events: SharedSink) -> Self {
        ProgressStore {
            entries: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ProgressEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking a transfer. An existing entry under the same key is reset.
    pub fn add(&self, key: &str, name: &str, kind: TransferKind) {
        let entry = ProgressEntry {
            key: key.to_string(),
            name: name.to_string(),
            kind,
            loaded: 0,
            total: 0,
            started_at: chrono::Utc::now().timestamp(),
        };
        self.lock().insert(key.to_string(), entry.clone());
        emit(self.events.as_ref(), PROGRESS_UPDATED, &entry);
    }

    /// Like `add`, but keeps an entry that is already being tracked. Returns true if one was created.
    pub fn ensure(&self, key: &str, name: &str, kind: TransferKind) -> bool {
        if self.lock().contains_key(key) {
            return false;
        }
        self.add(key, name, kind);
        true
    }

    /// Record new counters. Returns false (and does nothing) for an untracked key.
    pub fn update(&self, key: &str, loaded: u64, total: u64) -> bool {
        let snapshot = {
            let mut entries = self.lock();
            match entries.get_mut(key) {
                Some(entry) => {
                    entry.loaded = loaded;
                    entry.total = total;
                    entry.clone()
                }
                None => return false,
            }
        };
        emit(self.events.as_ref(), PROGRESS_UPDATED, &snapshot);
        true
    }

    pub fn remove(&self, key: &str) -> Option<ProgressEntry> {
        let removed = self.lock().remove(key);
        if removed.is_some() {
            emit(
                self.events.as_ref(),
                PROGRESS_REMOVED,
                &ProgressRemoved {
                    key: key.to_string(),
                },
            );
        }
        removed
    }

    pub fn get(&self, key: &str) -> Option<ProgressEntry> {
        self.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// All in-flight transfers, oldest first
    pub fn entries(&self) -> Vec<ProgressEntry> {
        let mut entries: Vec<ProgressEntry> = self.lock().values().cloned().collect();
        entries.sort_by(|a, b| a.started_at.cmp(&b.started_at).then(a.key.cmp(&b.key)));
        entries
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
