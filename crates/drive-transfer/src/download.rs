//! Streamed downloads with progress

use crate::error::{check_status, TransferResult};
use crate::ProgressCallback;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{RequestBuilder, Response};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Write buffer size for file downloads (2 MB) - reduces I/O operations
const WRITE_BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// Never pre-allocate more than this for an in-memory download, whatever Content-Length says
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

async fn start(request: RequestBuilder) -> TransferResult<(Response, Option<u64>)> {
    let response = check_status(request.send().await?).await?;
    let total = response.content_length();
    Ok((response, total))
}

/// Download a whole body into memory
pub async fn download_bytes(
    request: RequestBuilder,
    on_progress: Option<ProgressCallback>,
) -> TransferResult<Bytes> {
    let (response, total) = start(request).await?;

    let capacity = total.unwrap_or(0).min(MAX_PREALLOCATION) as usize;
    let mut buffer = BytesMut::with_capacity(capacity);
    let mut loaded: u64 = 0;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        loaded += chunk.len() as u64;
        buffer.extend_from_slice(&chunk);
        if let Some(callback) = &on_progress {
            callback(loaded, total);
        }
    }

    Ok(buffer.freeze())
}

/// Stream a body onto disk. The destination is removed if the transfer fails midway.
pub async fn download_to_file(
    request: RequestBuilder,
    destination: &Path,
    on_progress: Option<ProgressCallback>,
) -> TransferResult<u64> {
    let (response, total) = start(request).await?;

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = File::create(destination).await?;

    match stream_into(response, &mut file, total, on_progress).await {
        Ok(written) => Ok(written),
        Err(e) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                log::warn!(
                    "Failed to remove partial download {}: {}",
                    destination.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

async fn stream_into(
    response: Response,
    file: &mut File,
    total: Option<u64>,
    on_progress: Option<ProgressCallback>,
) -> TransferResult<u64> {
    let mut write_buffer = Vec::with_capacity(WRITE_BUFFER_SIZE);
    let mut loaded: u64 = 0;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        loaded += chunk.len() as u64;
        write_buffer.extend_from_slice(&chunk);

        if write_buffer.len() >= WRITE_BUFFER_SIZE {
            file.write_all(&write_buffer).await?;
            write_buffer.clear();
        }

        if let Some(callback) = &on_progress {
            callback(loaded, total);
        }
    }

    if !write_buffer.is_empty() {
        file.write_all(&write_buffer).await?;
    }
    file.flush().await?;

    Ok(loaded)
}
