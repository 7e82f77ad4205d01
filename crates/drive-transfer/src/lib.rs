//! HTTP transfer engine used by the drive client
//!
//! - `upload`: multipart chunk submission with payload-level progress
//! - `download`: streamed downloads into memory or onto disk
//! - `chunker`: sequential fixed-size file chunking

mod chunker;
mod download;
mod error;
mod upload;

use std::sync::Arc;

pub use chunker::{total_chunks, FileChunk, FileChunker};
pub use download::{download_bytes, download_to_file};
pub use error::{TransferError, TransferResult};
pub use upload::{send_chunk, ChunkUpload};

/// Progress callback: `(loaded_bytes, total_bytes)`, total is `None` when the peer did not announce it
pub type ProgressCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;
