use crate::api;
use crate::drive::Drive;
use crate::error::{DriveError, DriveResult};
use crate::store::ElementKind;

/// Names may not contain whitespace; every whitespace character becomes `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Put `key` into rename mode. Returns false for an unknown element.
pub fn start_rename(drive: &Drive, key: &str) -> bool {
    drive.elements.update(|elements| elements.start_renaming(key))
}

/// Leave rename mode without touching the name (Escape)
pub fn cancel_rename(drive: &Drive, key: &str) {
    drive.elements.update(|elements| elements.end_renaming(key));
}

/// Confirm a rename (Enter).
///
/// The new name is shown immediately; if the server rejects it the previous
/// name is restored and the folder's cached listing is left alone. Returns
/// `Ok(false)` when nothing needed renaming.
pub async fn confirm_rename(drive: &Drive, key: &str, new_name: &str) -> DriveResult<bool> {
    let element = drive
        .elements
        .read(|elements| elements.get(key).cloned())
        .ok_or_else(|| DriveError::NotFound(key.to_string()))?;

    let new_name = sanitize_name(new_name.trim());
    if new_name.is_empty() || new_name == element.name {
        cancel_rename(drive, key);
        return Ok(false);
    }
    if element.kind == ElementKind::Upload {
        cancel_rename(drive, key);
        return Err(DriveError::InvalidInput(
            "the upload shortcut cannot be renamed".to_string(),
        ));
    }

    let previous = drive.elements.update(|elements| {
        let previous = elements.rename(key, &new_name);
        elements.end_renaming(key);
        previous
    });

    let result = match element.kind {
        ElementKind::Folder => api::folder::rename_folder(&drive.api, key, &new_name).await,
        _ => api::file::rename_file(&drive.api, key, &new_name).await,
    };

    match result {
        Ok(()) => {
            drive.cache.invalidate(&[element.parent_key.as_str()]);
            log::info!("Renamed {} to {}", element.name, new_name);
            Ok(true)
        }
        Err(e) => {
            log::warn!("Rename of {} failed, restoring name: {}", element.name, e);
            let restored = previous.unwrap_or(element.name);
            drive.elements.update(|elements| elements.rename(key, &restored));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_becomes_underscores() {
        assert_eq!(sanitize_name("my holiday\tphotos"), "my_holiday_photos");
        assert_eq!(sanitize_name("plain"), "plain");
    }
}
