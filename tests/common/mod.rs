#![allow(dead_code)]

use clouddrive_lib::{ChannelSink, Drive, DriveConfig, DriveEvent};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use wiremock::MockServer;

/// Client pointed at the mock server, without retries, with an in-memory preference store
pub async fn drive(server: &MockServer) -> (Drive, broadcast::Receiver<DriveEvent>) {
    drive_with_retries(server, 0).await
}

pub async fn drive_with_retries(
    server: &MockServer,
    retry_count: u32,
) -> (Drive, broadcast::Receiver<DriveEvent>) {
    let mut config = DriveConfig::new(server.uri());
    config.retry_count = retry_count;
    let (sink, receiver) = ChannelSink::new(4096);
    let drive = Drive::new(config, Arc::new(sink)).await.unwrap();
    (drive, receiver)
}

pub fn drain(receiver: &mut broadcast::Receiver<DriveEvent>) -> Vec<DriveEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

/// `root` holds folder `d1` ("docs") and files `f1` ("photo.png") and `f2` ("notes.txt")
pub fn root_listing() -> Value {
    json!({
        "folders": [{ "folderKey": "d1", "folderName": "docs" }],
        "files": [
            { "fileKey": "f1", "fileName": "photo.png", "fileSize": 2048 },
            { "fileKey": "f2", "fileName": "notes.txt", "fileSize": 12 }
        ]
    })
}
