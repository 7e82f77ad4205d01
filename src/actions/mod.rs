//! User-level operations
//!
//! Each action combines API calls with store, cache and progress updates:
//! - `open`: open an element in the window it belongs in
//! - `rename`: rename-in-place with rollback
//! - `trash`: trash, permanent delete, empty trash
//! - `drop`: finish a drag (moves) or drop local files (uploads)
//! - `bootstrap`: startup sequence and user preferences
//! - `folders`: create, move, inspect and resolve nodes

pub mod bootstrap;
pub mod drop;
pub mod folders;
pub mod open;
pub mod rename;
pub mod trash;

use crate::error::DriveError;

/// Outcome of an operation applied to several keys at once
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, DriveError)>,
}

impl BatchReport {
    fn record(&mut self, key: String, result: Result<(), DriveError>) {
        match result {
            Ok(()) => self.succeeded.push(key),
            Err(e) => self.failed.push((key, e)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub use bootstrap::{bootstrap, set_theme};
pub use drop::{drop_elements, drop_paths, move_elements};
pub use folders::{create_folder, node_info, node_path, resolve_node, NodeInfo};
pub use open::open_element;
pub use rename::{cancel_rename, confirm_rename, sanitize_name, start_rename};
pub use trash::{delete_permanently, empty_trash, move_to_trash, open_trash};
