use crate::api::ReadFolderData;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Folder,
    File,
    /// Desktop shortcut that opens the uploader; has no server-side node
    Upload,
}

/// A node as displayed inside a folder view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub key: String,
    pub name: String,
    pub parent_key: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub renaming: bool,
}

impl Element {
    pub fn new(key: &str, name: &str, parent_key: &str, kind: ElementKind) -> Self {
        Element {
            key: key.to_string(),
            name: name.to_string(),
            parent_key: parent_key.to_string(),
            kind,
            size: 0,
            selected: false,
            renaming: false,
        }
    }
}

/// Every element currently shown in some folder view, plus selection and rename mode
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElementState {
    elements: HashMap<String, Element>,
}

impl ElementState {
    /// Replace the children of `parent_key` with a fresh listing.
    /// Selection and rename mode survive for keys that are still present.
    pub fn load_folder(&mut self, parent_key: &str, listing: &ReadFolderData) {
        let previous: HashMap<String, (bool, bool)> = self
            .elements
            .values()
            .filter(|e| e.parent_key == parent_key)
            .map(|e| (e.key.clone(), (e.selected, e.renaming)))
            .collect();
        self.elements.retain(|_, e| e.parent_key != parent_key);

        let folders = listing.folders.iter().map(|f| {
            Element::new(&f.folder_key, &f.folder_name, parent_key, ElementKind::Folder)
        });
        let files = listing.files.iter().map(|f| Element {
            size: f.file_size,
            ..Element::new(&f.file_key, &f.file_name, parent_key, ElementKind::File)
        });

        for mut element in folders.chain(files) {
            if let Some(&(selected, renaming)) = previous.get(&element.key) {
                element.selected = selected;
                element.renaming = renaming;
            }
            self.elements.insert(element.key.clone(), element);
        }
    }

    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.key.clone(), element);
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.get(key)
    }

    /// Children of a folder, folders first, then by name (case-insensitive)
    pub fn children(&self, parent_key: &str) -> Vec<&Element> {
        let mut children: Vec<&Element> = self
            .elements
            .values()
            .filter(|e| e.parent_key == parent_key)
            .collect();
        children.sort_by(|a, b| {
            let rank = |e: &Element| e.kind != ElementKind::Folder;
            rank(a)
                .cmp(&rank(b))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.key.cmp(&b.key))
        });
        children
    }

    /// Select only `key`. Returns false if it is unknown.
    pub fn select(&mut self, key: &str) -> bool {
        if !self.elements.contains_key(key) {
            return false;
        }
        for element in self.elements.values_mut() {
            element.selected = element.key == key;
        }
        true
    }

    /// Flip one element's selection, leaving the others alone
    pub fn toggle(&mut self, key: &str) -> bool {
        match self.elements.get_mut(key) {
            Some(element) => {
                element.selected = !element.selected;
                true
            }
            None => false,
        }
    }

    /// Add several keys to the selection (rubber-band select). Unknown keys are ignored.
    pub fn select_many(&mut self, keys: &[String]) {
        let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
        for element in self.elements.values_mut() {
            if wanted.contains(element.key.as_str()) {
                element.selected = true;
            }
        }
    }

    pub fn clear_selection(&mut self) {
        for element in self.elements.values_mut() {
            element.selected = false;
        }
    }

    pub fn selected_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .elements
            .values()
            .filter(|e| e.selected)
            .map(|e| e.key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Enter rename mode for `key`; any other element leaves it
    pub fn start_renaming(&mut self, key: &str) -> bool {
        if !self.elements.contains_key(key) {
            return false;
        }
        for element in self.elements.values_mut() {
            element.renaming = element.key == key;
        }
        true
    }

    pub fn end_renaming(&mut self, key: &str) {
        if let Some(element) = self.elements.get_mut(key) {
            element.renaming = false;
        }
    }

    pub fn renaming_key(&self) -> Option<&str> {
        self.elements
            .values()
            .find(|e| e.renaming)
            .map(|e| e.key.as_str())
    }

    pub fn is_renaming(&self) -> bool {
        self.renaming_key().is_some()
    }

    /// Set the displayed name, returning the previous one
    pub fn rename(&mut self, key: &str, name: &str) -> Option<String> {
        let element = self.elements.get_mut(key)?;
        Some(std::mem::replace(&mut element.name, name.to_string()))
    }

    /// Remove an element and everything known to live below it.
    /// Returns every removed key, `key` first; empty if it was unknown.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        if self.elements.remove(key).is_none() {
            return Vec::new();
        }

        let mut removed = vec![key.to_string()];
        let mut pending = vec![key.to_string()];
        while let Some(parent) = pending.pop() {
            let children: Vec<String> = self
                .elements
                .values()
                .filter(|e| e.parent_key == parent)
                .map(|e| e.key.clone())
                .collect();
            for child in children {
                self.elements.remove(&child);
                removed.push(child.clone());
                pending.push(child);
            }
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
