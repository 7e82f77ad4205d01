use crate::api::{self, FileInfo, FolderInfo};
use crate::drive::Drive;
use crate::error::{DriveError, DriveResult};
use crate::store::{Element, ElementKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeInfo {
    Folder(FolderInfo),
    File(FileInfo),
}

/// Look a node up on the server, folders first. 404 on both means it does not exist.
pub async fn node_info(drive: &Drive, key: &str) -> DriveResult<NodeInfo> {
    match api::folder::get_folder_info(&drive.api, key).await {
        Ok(info) => return Ok(NodeInfo::Folder(info)),
        Err(e) if e.status() == Some(404) => {}
        Err(e) => return Err(e),
    }

    match api::file::get_file_info(&drive.api, key).await {
        Ok(info) => Ok(NodeInfo::File(info)),
        Err(e) if e.status() == Some(404) => Err(DriveError::NotFound(key.to_string())),
        Err(e) => Err(e),
    }
}

/// The element for `key`, from the element store or, failing that, from the server
pub async fn resolve_node(drive: &Drive, key: &str) -> DriveResult<Element> {
    if let Some(element) = drive.elements.read(|elements| elements.get(key).cloned()) {
        return Ok(element);
    }

    let element = match node_info(drive, key).await? {
        NodeInfo::Folder(info) => Element::new(
            &info.folder_key,
            &info.folder_name,
            info.parent_key.as_deref().unwrap_or_default(),
            ElementKind::Folder,
        ),
        NodeInfo::File(info) => Element {
            size: info.file_size,
            ..Element::new(&info.file_key, &info.file_name, &info.folder_key, ElementKind::File)
        },
    };

    drive.elements.update(|elements| elements.insert(element.clone()));
    Ok(element)
}

/// Create a subfolder and return its key
pub async fn create_folder(drive: &Drive, parent_key: &str, folder_name: &str) -> DriveResult<String> {
    let folder_name = folder_name.trim();
    if folder_name.is_empty() {
        return Err(DriveError::InvalidInput(
            "folder name must not be empty".to_string(),
        ));
    }

    let key = api::folder::create_folder(&drive.api, parent_key, folder_name).await?;
    drive.cache.invalidate(&[parent_key]);
    log::info!("Created folder {} ({}) in {}", folder_name, key, parent_key);
    Ok(key)
}

/// Names from the root down to `key`. Files resolve through their folder.
pub async fn node_path(drive: &Drive, key: &str) -> DriveResult<Vec<String>> {
    let element = resolve_node(drive, key).await?;
    match element.kind {
        ElementKind::Folder => api::folder::get_folder_path(&drive.api, key).await,
        ElementKind::File => {
            let mut path = api::folder::get_folder_path(&drive.api, &element.parent_key).await?;
            path.push(element.name);
            Ok(path)
        }
        ElementKind::Upload => Err(DriveError::InvalidInput(format!(
            "{} is not a storage node",
            key
        ))),
    }
}

/// Move a folder or file under `target_key`
pub(crate) async fn move_node(drive: &Drive, element: &Element, target_key: &str) -> DriveResult<()> {
    match element.kind {
        ElementKind::Folder => api::folder::move_folder(&drive.api, &element.key, target_key).await,
        ElementKind::File => api::file::move_file(&drive.api, &element.key, target_key).await,
        ElementKind::Upload => Err(DriveError::InvalidInput(
            "the upload shortcut cannot be moved".to_string(),
        )),
    }
}

pub(crate) async fn delete_node(drive: &Drive, element: &Element) -> DriveResult<()> {
    match element.kind {
        ElementKind::Folder => api::folder::delete_folder(&drive.api, &element.key).await,
        ElementKind::File => api::file::delete_file(&drive.api, &element.key).await,
        ElementKind::Upload => Err(DriveError::InvalidInput(
            "the upload shortcut cannot be deleted".to_string(),
        )),
    }
}
