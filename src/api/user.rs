//! Membership operations

use super::urls;
use super::ApiClient;
use crate::error::DriveResult;

/// Succeeds when the authenticated user is enrolled; a 404 means they are not
pub async fn check_user(api: &ApiClient) -> DriveResult<()> {
    api.query_ok(&urls::user::check_user()).await
}

pub async fn enroll_user(api: &ApiClient) -> DriveResult<()> {
    api.execute(&urls::user::enroll_user()).await?;
    log::info!("Enrolled user at {}", api.base_url());
    Ok(())
}

pub async fn delete_user(api: &ApiClient) -> DriveResult<()> {
    api.execute(&urls::user::delete_user()).await?;
    log::info!("Deleted user at {}", api.base_url());
    Ok(())
}
