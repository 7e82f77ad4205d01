//! Decide which viewer window a file opens in, from its name alone

use crate::store::WindowType;
use mime_guess::mime;

/// Viewer for a file name. Unknown or non-media types get `WindowType::Other`.
pub fn window_type_for(file_name: &str) -> WindowType {
    let guess = match mime_guess::from_path(file_name).first() {
        Some(guess) => guess,
        None => return WindowType::Other,
    };

    match guess.type_() {
        mime::IMAGE => WindowType::Image,
        mime::VIDEO => WindowType::Video,
        mime::AUDIO => WindowType::Audio,
        _ => WindowType::Other,
    }
}

/// MIME type string for display, `application/octet-stream` when unknown
pub fn mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
