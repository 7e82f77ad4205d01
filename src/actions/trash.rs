use super::folders::{delete_node, move_node, resolve_node};
use super::BatchReport;
use crate::api;
use crate::drive::Drive;
use crate::error::DriveResult;
use crate::store::{Element, NewWindow, WindowType};
use futures_util::future::join_all;
use std::collections::BTreeSet;
use std::future::Future;

/// Open (or focus) the trash window
pub async fn open_trash(drive: &Drive) -> DriveResult<String> {
    let trash_key = api::folder::get_trash_folder_key(&drive.api).await?;
    let window_key = drive.windows.update(|windows| {
        let existing = windows
            .windows()
            .iter()
            .find(|w| w.window_type == WindowType::Trash)
            .map(|w| w.key.clone());
        match existing {
            Some(key) => {
                windows.update_window(&key, &trash_key, None);
                windows.set_current_window(&key);
                key
            }
            None => windows.new_window(NewWindow::new(&trash_key, WindowType::Trash, "Trash")),
        }
    });
    Ok(window_key)
}

/// Move nodes into the trash folder
pub async fn move_to_trash(drive: &Drive, keys: &[String]) -> DriveResult<BatchReport> {
    let trash_key = api::folder::get_trash_folder_key(&drive.api).await?;
    let trash_key = trash_key.as_str();

    let report = apply(
        drive,
        keys,
        |element| async move { move_node(drive, &element, trash_key).await },
        &[trash_key],
    )
    .await;

    log::info!(
        "Moved {} node(s) to trash, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Delete nodes for good
pub async fn delete_permanently(drive: &Drive, keys: &[String]) -> DriveResult<BatchReport> {
    let report = apply(
        drive,
        keys,
        |element| async move { delete_node(drive, &element).await },
        &[],
    )
    .await;

    log::info!(
        "Deleted {} node(s), {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Permanently delete everything in the trash folder
pub async fn empty_trash(drive: &Drive) -> DriveResult<BatchReport> {
    let trash_key = api::folder::get_trash_folder_key(&drive.api).await?;
    let listing = drive.refresh_folder(&trash_key).await?;

    let keys: Vec<String> = listing
        .folders
        .iter()
        .map(|f| f.folder_key.clone())
        .chain(listing.files.iter().map(|f| f.file_key.clone()))
        .collect();
    if keys.is_empty() {
        return Ok(BatchReport::default());
    }

    delete_permanently(drive, &keys).await
}

/// Run `op` on every key concurrently. Cached listings of every touched folder
/// are invalidated whatever the outcome; nodes that went away lose their
/// elements and any windows bound to them.
async fn apply<F, Fut>(
    drive: &Drive,
    keys: &[String],
    op: F,
    extra_invalidations: &[&str],
) -> BatchReport
where
    F: Fn(Element) -> Fut,
    Fut: Future<Output = DriveResult<()>>,
{
    let resolved = join_all(keys.iter().map(|key| resolve_node(drive, key))).await;

    let mut report = BatchReport::default();
    let mut parents = BTreeSet::new();
    let mut pending = Vec::new();
    for (key, element) in keys.iter().zip(resolved) {
        match element {
            Ok(element) => {
                parents.insert(element.parent_key.clone());
                pending.push(element);
            }
            Err(e) => report.record(key.clone(), Err(e)),
        }
    }

    let outcomes = join_all(pending.iter().cloned().map(&op)).await;
    for (element, result) in pending.into_iter().zip(outcomes) {
        report.record(element.key, result);
    }

    let mut gone: Vec<String> = drive.elements.update(|elements| {
        report
            .succeeded
            .iter()
            .flat_map(|key| elements.remove(key))
            .collect()
    });
    // Keys the element store never saw still had windows of their own
    for key in &report.succeeded {
        if !gone.contains(key) {
            gone.push(key.clone());
        }
    }
    drive.windows.update(|windows| {
        for key in &gone {
            windows.close_windows_targeting(key);
        }
    });

    let mut invalidated: Vec<&str> = parents
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    invalidated.extend_from_slice(extra_invalidations);
    invalidated.extend(report.succeeded.iter().map(String::as_str));
    drive.cache.invalidate(&invalidated);

    report
}
