use crate::content_type::window_type_for;
use crate::drive::Drive;
use crate::error::{DriveError, DriveResult};
use crate::store::{ElementKind, NewWindow, WindowType};

/// Open an element the way a double click does. Returns the key of the window showing it.
///
/// A folder navigates the window already showing its parent, if there is one;
/// otherwise it gets a new navigator. Files open a viewer chosen from the
/// file name; the upload shortcut opens the uploader for its folder.
pub fn open_element(drive: &Drive, key: &str) -> DriveResult<String> {
    let element = drive
        .elements
        .read(|elements| elements.get(key).cloned())
        .ok_or_else(|| DriveError::NotFound(key.to_string()))?;

    let window_key = drive.windows.update(|windows| match element.kind {
        ElementKind::Folder => {
            let existing = windows
                .find_window_by_target(&element.parent_key)
                .map(|w| w.key.clone());
            match existing {
                Some(window_key) => {
                    windows.update_window(&window_key, &element.key, Some(&element.name));
                    windows.set_current_window(&window_key);
                    window_key
                }
                None => windows.new_window(NewWindow::new(
                    &element.key,
                    WindowType::Navigator,
                    &element.name,
                )),
            }
        }
        ElementKind::File => windows.new_window(NewWindow::new(
            &element.key,
            window_type_for(&element.name),
            &element.name,
        )),
        ElementKind::Upload => windows.new_window(NewWindow::new(
            &element.parent_key,
            WindowType::Uploader,
            &element.name,
        )),
    });

    log::debug!("Opened {} in window {}", element.name, window_key);
    Ok(window_key)
}
