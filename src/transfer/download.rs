use crate::drive::Drive;
use crate::error::DriveResult;
use crate::progress::TransferKind;
use bytes::Bytes;
use drive_transfer::ProgressCallback;
use std::path::Path;
use std::sync::Arc;

/// Start tracking a download when it has a display name
fn track(drive: &Drive, file_key: &str, name: Option<&str>) -> Option<ProgressCallback> {
    let name = name?;
    drive.progress.add(file_key, name, TransferKind::Download);

    let progress = drive.progress.clone();
    let key = file_key.to_string();
    Some(Arc::new(move |loaded, total| {
        progress.update(&key, loaded, total.unwrap_or(0));
    }))
}

/// Download a file into memory. With a display name, progress is tracked
/// under the file key; the entry is removed whether or not the download succeeds.
pub async fn download_file(drive: &Drive, file_key: &str, name: Option<&str>) -> DriveResult<Bytes> {
    let on_progress = track(drive, file_key, name);
    let tracked = on_progress.is_some();

    let request = crate::api::file::download_request(&drive.api, file_key);
    let result = drive_transfer::download_bytes(request, on_progress).await;

    if tracked {
        drive.progress.remove(file_key);
    }
    match result {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            log::warn!("Download of {} failed: {}", file_key, e);
            Err(e.into())
        }
    }
}

/// Stream a file onto disk at `destination`. Returns the number of bytes written.
pub async fn download_file_to(
    drive: &Drive,
    file_key: &str,
    name: Option<&str>,
    destination: &Path,
) -> DriveResult<u64> {
    let on_progress = track(drive, file_key, name);
    let tracked = on_progress.is_some();

    let request = crate::api::file::download_request(&drive.api, file_key);
    let result = drive_transfer::download_to_file(request, destination, on_progress).await;

    if tracked {
        drive.progress.remove(file_key);
    }
    match result {
        Ok(written) => {
            log::info!("Downloaded {} to {} ({} bytes)", file_key, destination.display(), written);
            Ok(written)
        }
        Err(e) => {
            log::warn!("Download of {} failed: {}", file_key, e);
            Err(e.into())
        }
    }
}
