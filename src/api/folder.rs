//! Folder operations

use super::client::parse_key;
use super::types::{FolderInfo, FolderNameBody, ReadFolderData};
use super::urls;
use super::ApiClient;
use crate::error::DriveResult;

/// Create the user's root folder, returning its key
pub async fn create_root_folder(api: &ApiClient) -> DriveResult<String> {
    let response = api.execute(&urls::folder::create_root_folder()).await?;
    parse_key(&response.text().await?)
}

/// Create a subfolder, returning the new folder's key
pub async fn create_folder(
    api: &ApiClient,
    folder_key: &str,
    folder_name: &str,
) -> DriveResult<String> {
    let response = api
        .execute_json(
            &urls::folder::create_folder(folder_key),
            &FolderNameBody { folder_name },
        )
        .await?;
    parse_key(&response.text().await?)
}

pub async fn read_folder(api: &ApiClient, folder_key: &str) -> DriveResult<ReadFolderData> {
    api.query_json(&urls::folder::read_folder(folder_key)).await
}

pub async fn get_root_folder_key(api: &ApiClient) -> DriveResult<String> {
    api.query_key(&urls::folder::root_folder_key()).await
}

pub async fn get_trash_folder_key(api: &ApiClient) -> DriveResult<String> {
    api.query_key(&urls::folder::trash_folder_key()).await
}

pub async fn delete_folder(api: &ApiClient, folder_key: &str) -> DriveResult<()> {
    api.execute(&urls::folder::delete_folder(folder_key)).await?;
    Ok(())
}

pub async fn move_folder(api: &ApiClient, folder_key: &str, target_key: &str) -> DriveResult<()> {
    api.execute(&urls::folder::move_folder(folder_key, target_key))
        .await?;
    Ok(())
}

pub async fn rename_folder(api: &ApiClient, folder_key: &str, folder_name: &str) -> DriveResult<()> {
    api.execute_json(
        &urls::folder::rename_folder(folder_key),
        &FolderNameBody { folder_name },
    )
    .await?;
    Ok(())
}

pub async fn get_folder_info(api: &ApiClient, folder_key: &str) -> DriveResult<FolderInfo> {
    api.query_json(&urls::folder::info(folder_key)).await
}

/// Folder names from the root down to `folder_key`
pub async fn get_folder_path(api: &ApiClient, folder_key: &str) -> DriveResult<Vec<String>> {
    api.query_json(&urls::folder::path(folder_key)).await
}
