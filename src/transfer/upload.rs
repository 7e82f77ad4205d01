use crate::drive::Drive;
use crate::error::{DriveError, DriveResult};
use crate::progress::TransferKind;
use bytes::Bytes;
use drive_transfer::{ChunkUpload, FileChunker, ProgressCallback};
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub folder_key: String,
    pub file_name: String,
    pub size: u64,
    pub total_chunks: u64,
}

/// Progress key for an upload
pub fn upload_key(folder_key: &str, file_name: &str) -> String {
    format!("{}-{}", folder_key, file_name)
}

/// Send one chunk of `file_name` into `folder_key`.
///
/// Progress is reported under `upload_key(folder_key, file_name)` as
/// `chunk_number * chunk_len + sent` out of `chunk_len * total_chunks`,
/// with `chunk_len` the length of this chunk. The entry is removed after the
/// last chunk and whenever a chunk fails.
pub async fn upload_chunk(
    drive: &Drive,
    folder_key: &str,
    chunk: Bytes,
    file_name: &str,
    total_chunks: u64,
    chunk_number: u64,
) -> DriveResult<()> {
    let key = upload_key(folder_key, file_name);
    drive.progress.ensure(&key, file_name, TransferKind::Upload);

    let chunk_len = chunk.len() as u64;
    let base = chunk_number * chunk_len;
    let total = chunk_len * total_chunks;

    let on_progress: ProgressCallback = {
        let progress = drive.progress.clone();
        let key = key.clone();
        Arc::new(move |sent, _| {
            progress.update(&key, base + sent, total);
        })
    };

    let upload = ChunkUpload {
        file_name: file_name.to_string(),
        total_chunks,
        chunk_number,
        data: chunk,
    };
    let request = crate::api::file::upload_chunk_request(&drive.api, folder_key);

    match drive_transfer::send_chunk(request, upload, Some(on_progress)).await {
        Ok(_) => {
            drive.progress.update(&key, base + chunk_len, total);
            if chunk_number + 1 >= total_chunks {
                drive.progress.remove(&key);
            }
            Ok(())
        }
        Err(e) => {
            log::warn!(
                "Chunk {}/{} of {} failed: {}",
                chunk_number + 1,
                total_chunks,
                file_name,
                e
            );
            drive.progress.remove(&key);
            Err(e.into())
        }
    }
}

/// Upload a local file into `folder_key`, one chunk at a time
pub async fn upload_file(drive: &Drive, folder_key: &str, path: &Path) -> DriveResult<UploadResult> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DriveError::InvalidInput(format!("not a file path: {}", path.display())))?;

    let mut chunker = FileChunker::open(path, drive.config.chunk_size).await?;
    let total_chunks = chunker.total_chunks();
    let size = chunker.file_size();

    log::info!(
        "Uploading {} ({} bytes, {} chunks) into {}",
        file_name,
        size,
        total_chunks,
        folder_key
    );

    let key = upload_key(folder_key, &file_name);
    loop {
        let chunk = match chunker.next_chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                drive.progress.remove(&key);
                return Err(e.into());
            }
        };
        upload_chunk(drive, folder_key, chunk.data, &file_name, total_chunks, chunk.index).await?;
    }

    drive.progress.remove(&key);
    drive.cache.invalidate(&[folder_key]);
    log::info!("Uploaded {} into {}", file_name, folder_key);

    Ok(UploadResult {
        folder_key: folder_key.to_string(),
        file_name,
        size,
        total_chunks,
    })
}

/// Upload several files into one folder, at most `max_concurrent_uploads` at a time.
///
/// Files land in the folder under their own name, so only the first path with
/// a given name is uploaded; later ones fail with `InvalidInput`. Rejected
/// paths come first in the result, the rest in completion order.
pub async fn upload_files(
    drive: &Drive,
    folder_key: &str,
    paths: &[PathBuf],
) -> Vec<(PathBuf, DriveResult<UploadResult>)> {
    let mut seen = HashSet::new();
    let (unique, duplicates): (Vec<&PathBuf>, Vec<&PathBuf>) =
        paths.iter().partition(|&path| seen.insert(path.file_name()));

    let mut results: Vec<(PathBuf, DriveResult<UploadResult>)> = duplicates
        .into_iter()
        .map(|path| {
            log::warn!("Skipping {}: same name as another file in this upload", path.display());
            let err = DriveError::InvalidInput(format!(
                "another file named {} is already part of this upload",
                path.file_name().unwrap_or_default().to_string_lossy()
            ));
            (path.clone(), Err(err))
        })
        .collect();

    let uploaded = stream::iter(unique)
        .map(|path| async move { (path.clone(), upload_file(drive, folder_key, path).await) })
        .buffer_unordered(drive.config.max_concurrent_uploads.max(1))
        .collect::<Vec<_>>()
        .await;
    results.extend(uploaded);
    results
}
