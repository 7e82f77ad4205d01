use serde::Serialize;

/// What a finished drag resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub keys: Vec<String>,
    pub source_key: String,
    pub target_key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    keys: Vec<String>,
    source_key: Option<String>,
    target_key: Option<String>,
}

impl DragState {
    /// Begin dragging `keys` out of the folder `source_key`
    pub fn start(&mut self, keys: Vec<String>, source_key: &str) {
        self.keys = keys;
        self.source_key = Some(source_key.to_string());
        self.target_key = None;
    }

    /// Track the container under the cursor; `None` when over nothing droppable
    pub fn hover(&mut self, target_key: Option<&str>) {
        if self.is_dragging() {
            self.target_key = target_key.map(str::to_string);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.source_key.is_some() && !self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn target_key(&self) -> Option<&str> {
        self.target_key.as_deref()
    }

    pub fn cancel(&mut self) {
        *self = DragState::default();
    }

    /// End the drag. Yields a payload only when there is a target to drop on.
    pub fn finish(&mut self) -> Option<DragPayload> {
        let state = std::mem::take(self);
        if state.keys.is_empty() {
            return None;
        }
        Some(DragPayload {
            keys: state.keys,
            source_key: state.source_key?,
            target_key: state.target_key?,
        })
    }
}
