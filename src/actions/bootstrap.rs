use crate::api;
use crate::db;
use crate::drive::Drive;
use crate::error::{DriveError, DriveResult};
use crate::store::{NewWindow, Theme, WindowType};

/// Startup sequence.
///
/// Resolves the root folder key, enrolling the user on first visit and
/// creating the root folder when none exists yet, then marks the user as
/// logged in, restores the saved theme and opens the background window.
pub async fn bootstrap(drive: &Drive) -> DriveResult<String> {
    let root_key = resolve_root_key(drive).await?;

    let theme = match db::load_theme(drive.db()).await {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("Failed to load theme, using default: {}", e);
            Theme::Default
        }
    };
    drive.user.update(|user| {
        user.logged_in = true;
        user.theme = theme;
    });

    drive.windows.update(|windows| {
        let existing = windows
            .windows()
            .iter()
            .find(|w| w.window_type == WindowType::Background)
            .map(|w| w.key.clone());
        match existing {
            Some(key) => {
                windows.update_window(&key, &root_key, None);
            }
            None => {
                windows.new_window(NewWindow::new(&root_key, WindowType::Background, ""));
            }
        }
    });

    log::info!("Signed in, root folder {}", root_key);
    Ok(root_key)
}

async fn resolve_root_key(drive: &Drive) -> DriveResult<String> {
    let mut enrolled = false;
    loop {
        let err = match api::folder::get_root_folder_key(&drive.api).await {
            Ok(key) => return Ok(key),
            Err(e) => e,
        };

        match err.status() {
            Some(401) => return Err(DriveError::Unauthorized),
            Some(403) if !enrolled => {
                match api::user::check_user(&drive.api).await {
                    Err(e) if e.status() == Some(404) => {
                        log::info!("No membership yet, enrolling");
                        api::user::enroll_user(&drive.api).await?;
                        enrolled = true;
                    }
                    Err(e) => {
                        log::warn!("Membership check failed: {}", e);
                        return Err(DriveError::NotMember);
                    }
                    Ok(()) => return Err(DriveError::NotMember),
                }
            }
            Some(403) => return Err(DriveError::NotMember),
            Some(404) => {
                log::info!("No root folder yet, creating one");
                return api::folder::create_root_folder(&drive.api).await;
            }
            _ => return Err(err),
        }
    }
}

/// Change the theme and remember it. A failed save is logged, not returned.
pub async fn set_theme(drive: &Drive, theme: Theme) {
    drive.user.update(|user| user.theme = theme);
    if let Err(e) = db::save_theme(drive.db(), theme).await {
        log::warn!("Failed to save theme: {}", e);
    }
}
