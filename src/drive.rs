//! The client context: configuration, HTTP client, stores, progress tracker,
//! folder cache and local database, shared by every action.

use crate::api::{self, ApiClient, ReadFolderData};
use crate::cache::FolderCache;
use crate::config::DriveConfig;
use crate::db::Database;
use crate::error::{DriveError, DriveResult};
use crate::events::SharedSink;
use crate::progress::ProgressStore;
use crate::store::{DragState, ElementState, Store, UserState, WindowState};
use std::sync::Arc;

#[derive(Clone)]
pub struct Drive {
    pub api: ApiClient,
    pub config: DriveConfig,
    pub progress: ProgressStore,
    pub cache: FolderCache,
    pub windows: Store<WindowState>,
    pub elements: Store<ElementState>,
    pub drag: Store<DragState>,
    pub user: Store<UserState>,
    db: Arc<Database>,
}

impl Drive {
    /// Build the context. The preference database lives under `data_dir`, or
    /// in memory when none is configured.
    pub async fn new(config: DriveConfig, events: SharedSink) -> DriveResult<Self> {
        let api = ApiClient::new(&config)?;

        let db = match config.db_path() {
            Some(path) => Database::open(&path).await,
            None => Database::open_in_memory().await,
        }
        .map_err(|e| DriveError::Db(e.to_string()))?;

        Ok(Drive {
            api,
            progress: ProgressStore::new(events.clone()),
            cache: FolderCache::new(config.stale_time, events.clone()),
            windows: Store::new("window", WindowState::default(), events.clone()),
            elements: Store::new("element", ElementState::default(), events.clone()),
            drag: Store::new("drag", DragState::default(), events.clone()),
            user: Store::new("user", UserState::default(), events.clone()),
            db: Arc::new(db),
            config,
        })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Folder listing through the cache. A fetched listing also refreshes the
    /// element store for that folder.
    pub async fn read_folder(&self, folder_key: &str) -> DriveResult<ReadFolderData> {
        if let Some(listing) = self.cache.get_fresh(folder_key) {
            return Ok(listing);
        }
        self.refresh_folder(folder_key).await
    }

    /// Folder listing straight from the server, bypassing the cache
    pub async fn refresh_folder(&self, folder_key: &str) -> DriveResult<ReadFolderData> {
        let listing = api::folder::read_folder(&self.api, folder_key).await?;
        self.cache.insert(folder_key, listing.clone());
        self.elements
            .update(|elements| elements.load_folder(folder_key, &listing));
        Ok(listing)
    }
}
