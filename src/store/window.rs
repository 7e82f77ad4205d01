use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// The desktop itself, bound to the root folder
    Background,
    Navigator,
    Image,
    Video,
    Audio,
    Uploader,
    Trash,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub key: String,
    pub target_key: String,
    #[serde(rename = "type")]
    pub window_type: WindowType,
    pub title: String,
}

/// Request to open a window; `key` is generated when absent
#[derive(Debug, Clone)]
pub struct NewWindow {
    pub key: Option<String>,
    pub target_key: String,
    pub window_type: WindowType,
    pub title: String,
}

impl NewWindow {
    pub fn new(target_key: &str, window_type: WindowType, title: &str) -> Self {
        NewWindow {
            key: None,
            target_key: target_key.to_string(),
            window_type,
            title: title.to_string(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

pub fn create_window_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Open windows in stacking order (last is topmost) and the focused one
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    windows: Vec<Window>,
    current: Option<String>,
}

impl WindowState {
    /// Open a window and focus it. Reusing an existing key replaces that window in place.
    pub fn new_window(&mut self, request: NewWindow) -> String {
        let key = request.key.unwrap_or_else(create_window_key);
        let window = Window {
            key: key.clone(),
            target_key: request.target_key,
            window_type: request.window_type,
            title: request.title,
        };

        match self.windows.iter_mut().find(|w| w.key == key) {
            Some(existing) => *existing = window,
            None => self.windows.push(window),
        }
        self.set_current_window(&key);
        key
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn get(&self, key: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.key == key)
    }

    /// First non-background window showing `target_key`
    pub fn find_window_by_target(&self, target_key: &str) -> Option<&Window> {
        self.windows
            .iter()
            .find(|w| w.target_key == target_key && w.window_type != WindowType::Background)
    }

    /// Point a window at another node (navigating inside a navigator)
    pub fn update_window(&mut self, key: &str, target_key: &str, title: Option<&str>) -> bool {
        match self.windows.iter_mut().find(|w| w.key == key) {
            Some(window) => {
                window.target_key = target_key.to_string();
                if let Some(title) = title {
                    window.title = title.to_string();
                }
                true
            }
            None => false,
        }
    }

    pub fn close_window(&mut self, key: &str) -> Option<Window> {
        let index = self.windows.iter().position(|w| w.key == key)?;
        let closed = self.windows.remove(index);
        if self.current.as_deref() == Some(key) {
            self.current = self.topmost_key();
        }
        Some(closed)
    }

    /// Close every non-background window bound to `target_key`, e.g. after the node was deleted
    pub fn close_windows_targeting(&mut self, target_key: &str) -> Vec<Window> {
        let keys: Vec<String> = self
            .windows
            .iter()
            .filter(|w| w.target_key == target_key && w.window_type != WindowType::Background)
            .map(|w| w.key.clone())
            .collect();

        keys.iter()
            .filter_map(|key| self.close_window(key))
            .collect()
    }

    /// Focus a window, raising it to the top. The background window is never raised above others.
    pub fn set_current_window(&mut self, key: &str) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.key == key) else {
            return false;
        };

        if self.windows[index].window_type != WindowType::Background {
            let window = self.windows.remove(index);
            self.windows.push(window);
        }
        self.current = Some(key.to_string());
        true
    }

    pub fn current(&self) -> Option<&Window> {
        self.current.as_deref().and_then(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn topmost_key(&self) -> Option<String> {
        self.windows
            .iter()
            .rev()
            .find(|w| w.window_type != WindowType::Background)
            .or_else(|| self.windows.last())
            .map(|w| w.key.clone())
    }
}
