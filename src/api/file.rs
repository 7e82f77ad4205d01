//! File operations. Uploads and downloads go through `crate::transfer`, which
//! takes the prepared requests from here.

use super::types::{FileInfo, FileNameBody};
use super::urls;
use super::ApiClient;
use crate::error::DriveResult;
use reqwest::RequestBuilder;

/// `POST /file/{folderKey}`; the multipart chunk form is attached by the transfer layer
pub(crate) fn upload_chunk_request(api: &ApiClient, folder_key: &str) -> RequestBuilder {
    api.request(&urls::file::upload_file(folder_key))
}

/// `GET /file/{fileKey}`, binary response
pub(crate) fn download_request(api: &ApiClient, file_key: &str) -> RequestBuilder {
    api.request(&urls::file::download_file(file_key))
}

pub async fn delete_file(api: &ApiClient, file_key: &str) -> DriveResult<()> {
    api.execute(&urls::file::delete_file(file_key)).await?;
    Ok(())
}

pub async fn rename_file(api: &ApiClient, file_key: &str, file_name: &str) -> DriveResult<()> {
    api.execute_json(&urls::file::rename_file(file_key), &FileNameBody { file_name })
        .await?;
    Ok(())
}

pub async fn move_file(api: &ApiClient, file_key: &str, new_folder_key: &str) -> DriveResult<()> {
    api.execute(&urls::file::move_file(file_key, new_folder_key))
        .await?;
    Ok(())
}

pub async fn get_file_info(api: &ApiClient, file_key: &str) -> DriveResult<FileInfo> {
    api.query_json(&urls::file::file_info(file_key)).await
}
