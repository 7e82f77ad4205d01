//! Storage API client
//!
//! This module is organized into submodules:
//! - `urls`: endpoint table (method + path per operation)
//! - `types`: response and request bodies
//! - `client`: HTTP client with auth, status checking and read retries
//! - `user`, `folder`, `file`: one function per remote operation

mod client;
pub mod file;
pub mod folder;
mod types;
pub mod urls;
pub mod user;

pub use client::ApiClient;
pub use types::{FileEntry, FileInfo, FolderEntry, FolderInfo, ReadFolderData};
