//! Client core for a desktop-style cloud drive: storage API client, chunked
//! uploads and downloads with progress, client-side stores, folder cache and
//! the user actions built on them.

pub mod actions;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod content_type;
pub mod db;
pub mod drive;
pub mod error;
pub mod events;
pub mod progress;
pub mod store;
pub mod transfer;

pub use cli::run;
pub use config::DriveConfig;
pub use drive::Drive;
pub use error::{DriveError, DriveResult};
pub use events::{ChannelSink, DriveEvent, EventSink, LogSink, NullSink, SharedSink};
pub use progress::{ProgressEntry, ProgressStore, TransferKind};
