//! Multipart chunk submission

use crate::error::{check_status, TransferResult};
use crate::ProgressCallback;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, RequestBuilder, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Chunk payloads are handed to the connection in 64 KB slices; progress fires once per slice
const SLICE_SIZE: usize = 64 * 1024;

/// One chunk of a file, as the storage API expects it
#[derive(Debug, Clone)]
pub struct ChunkUpload {
    pub file_name: String,
    pub total_chunks: u64,
    /// 0-based
    pub chunk_number: u64,
    pub data: Bytes,
}

impl ChunkUpload {
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build the multipart form (`file`, `fileName`, `totalChunks`, `chunkNumber`).
    ///
    /// `on_progress` receives the number of payload bytes handed to the
    /// connection so far; multipart framing is not counted.
    pub fn into_form(self, on_progress: Option<ProgressCallback>) -> Form {
        let length = self.len();
        let file_part = Part::stream_with_length(progress_body(self.data, on_progress), length)
            .file_name(self.file_name.clone());

        Form::new()
            .part("file", file_part)
            .text("fileName", self.file_name)
            .text("totalChunks", self.total_chunks.to_string())
            .text("chunkNumber", self.chunk_number.to_string())
    }
}

fn progress_body(data: Bytes, on_progress: Option<ProgressCallback>) -> Body {
    let total = data.len() as u64;

    let mut slices = Vec::with_capacity(data.len() / SLICE_SIZE + 1);
    let mut offset = 0;
    while offset < data.len() {
        let end = usize::min(offset + SLICE_SIZE, data.len());
        slices.push(data.slice(offset..end));
        offset = end;
    }

    let sent = Arc::new(AtomicU64::new(0));
    let body = stream::iter(slices).map(move |slice| {
        let len = slice.len() as u64;
        let loaded = sent.fetch_add(len, Ordering::SeqCst) + len;
        if let Some(callback) = &on_progress {
            callback(loaded, Some(total));
        }
        Ok::<Bytes, std::io::Error>(slice)
    });

    Body::wrap_stream(body)
}

/// Send one chunk as a multipart request. Non-2xx responses become `TransferError::Status`.
pub async fn send_chunk(
    request: RequestBuilder,
    chunk: ChunkUpload,
    on_progress: Option<ProgressCallback>,
) -> TransferResult<Response> {
    log::debug!(
        "sending chunk {}/{} of {} ({} bytes)",
        chunk.chunk_number + 1,
        chunk.total_chunks,
        chunk.file_name,
        chunk.len()
    );

    let response = request
        .multipart(chunk.into_form(on_progress))
        .send()
        .await?;

    check_status(response).await
}
