use super::folders::{move_node, resolve_node};
use super::BatchReport;
use crate::drive::Drive;
use crate::error::DriveResult;
use crate::transfer::{self, UploadResult};
use futures_util::future::join_all;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Finish the current drag. Dragged elements move into the hovered folder;
/// a drag that ends over nothing does nothing.
pub async fn drop_elements(drive: &Drive) -> BatchReport {
    match drive.drag.update(|drag| drag.finish()) {
        Some(payload) => move_elements(drive, &payload.keys, &payload.target_key).await,
        None => BatchReport::default(),
    }
}

/// Move nodes into `target_key`. Dropping a folder onto itself or a node onto
/// the folder it already lives in is skipped.
pub async fn move_elements(drive: &Drive, keys: &[String], target_key: &str) -> BatchReport {
    let mut report = BatchReport::default();
    let mut touched = BTreeSet::new();
    let mut moves = Vec::new();

    for key in keys {
        if key == target_key {
            log::debug!("Skipping drop of {} onto itself", key);
            continue;
        }
        match resolve_node(drive, key).await {
            Ok(element) if element.parent_key == target_key => {
                log::debug!("{} is already in {}", key, target_key);
            }
            Ok(element) => {
                touched.insert(element.parent_key.clone());
                moves.push(element);
            }
            Err(e) => report.record(key.clone(), Err(e)),
        }
    }
    if moves.is_empty() {
        return report;
    }

    let outcomes = join_all(moves.iter().map(|element| move_node(drive, element, target_key))).await;
    for (element, result) in moves.iter().zip(outcomes) {
        report.record(element.key.clone(), result);
    }

    drive.elements.update(|elements| {
        for key in &report.succeeded {
            elements.remove(key);
        }
    });

    let mut invalidated: Vec<&str> = touched.iter().map(String::as_str).collect();
    invalidated.push(target_key);
    drive.cache.invalidate(&invalidated);

    log::info!(
        "Moved {} node(s) into {}, {} failed",
        report.succeeded.len(),
        target_key,
        report.failed.len()
    );
    report
}

/// Upload local files dropped onto a folder
pub async fn drop_paths(
    drive: &Drive,
    target_key: &str,
    paths: &[PathBuf],
) -> Vec<(PathBuf, DriveResult<UploadResult>)> {
    transfer::upload_files(drive, target_key, paths).await
}
