//! Wire types (camelCase JSON)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub folder_key: String,
    pub folder_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub file_key: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
}

/// Contents of one folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFolderData {
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl ReadFolderData {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub folder_key: String,
    pub folder_name: String,
    /// `None` for the root folder
    #[serde(default)]
    pub parent_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_key: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    pub folder_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FolderNameBody<'a> {
    pub folder_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileNameBody<'a> {
    pub file_name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folder_listing_tolerates_missing_sections() {
        let data: ReadFolderData = serde_json::from_value(json!({
            "folders": [{ "folderKey": "f1", "folderName": "Photos" }]
        }))
        .unwrap();
        assert_eq!(data.folders[0].folder_name, "Photos");
        assert!(data.files.is_empty());
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn rename_bodies_use_camel_case() {
        let body = serde_json::to_value(FolderNameBody { folder_name: "x" }).unwrap();
        assert_eq!(body, json!({ "folderName": "x" }));
        let body = serde_json::to_value(FileNameBody { file_name: "y" }).unwrap();
        assert_eq!(body, json!({ "fileName": "y" }));
    }

    #[test]
    fn root_folder_info_has_no_parent() {
        let info: FolderInfo =
            serde_json::from_value(json!({ "folderKey": "r", "folderName": "root" })).unwrap();
        assert!(info.parent_key.is_none());
    }
}
