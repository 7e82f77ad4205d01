//! Uploads and downloads with progress tracking
//!
//! The wire work is done by `drive_transfer`; this layer keys transfers,
//! feeds the progress tracker and keeps the folder cache honest.

mod download;
mod upload;

pub use download::{download_file, download_file_to};
pub use upload::{upload_chunk, upload_file, upload_files, upload_key, UploadResult};
