mod common;

use bytes::Bytes;
use clouddrive_lib::events::PROGRESS_UPDATED;
use clouddrive_lib::transfer::{self, upload_key};
use clouddrive_lib::TransferKind;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MIB: u64 = 1024 * 1024;

async fn accept_uploads(server: &MockServer, folder_key: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/file/{}", folder_key)))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn three_chunk_upload_reports_cumulative_progress() {
    let server = MockServer::start().await;
    accept_uploads(&server, "f1").await;
    let (drive, mut events) = common::drive(&server).await;
    let key = upload_key("f1", "movie.bin");

    let chunk = Bytes::from(vec![7u8; MIB as usize]);
    for index in 0..2 {
        transfer::upload_chunk(&drive, "f1", chunk.clone(), "movie.bin", 3, index)
            .await
            .unwrap();
    }

    let entry = drive.progress.get(&key).unwrap();
    assert_eq!(entry.kind, TransferKind::Upload);
    assert_eq!(entry.name, "movie.bin");
    assert_eq!(entry.loaded, 2 * MIB);
    assert_eq!(entry.total, 3 * MIB);

    transfer::upload_chunk(&drive, "f1", chunk, "movie.bin", 3, 2)
        .await
        .unwrap();
    assert!(drive.progress.get(&key).is_none());

    // Every reported numerator stays inside the current chunk's window
    let mut previous = 0;
    for event in common::drain(&mut events) {
        if event.name != PROGRESS_UPDATED || event.payload["key"] != key.as_str() {
            continue;
        }
        let loaded = event.payload["loaded"].as_u64().unwrap();
        let total = event.payload["total"].as_u64().unwrap();
        assert!(loaded >= previous, "progress went backwards");
        assert!(loaded <= total || total == 0);
        previous = loaded;
    }
    assert_eq!(previous, 3 * MIB);
}

#[tokio::test]
async fn failed_chunk_removes_progress_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/file/f1"))
        .respond_with(ResponseTemplate::new(507).set_body_string("quota exceeded"))
        .mount(&server)
        .await;
    let (drive, _events) = common::drive(&server).await;

    let err = transfer::upload_chunk(&drive, "f1", Bytes::from_static(b"abc"), "a.txt", 2, 0)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(507));
    assert!(drive.progress.is_empty());
}

#[tokio::test]
async fn upload_file_sends_every_chunk_and_invalidates_folder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/file/f1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = clouddrive_lib::DriveConfig::new(server.uri());
    config.retry_count = 0;
    config.chunk_size = 4;
    let drive = clouddrive_lib::Drive::new(config, std::sync::Arc::new(clouddrive_lib::NullSink))
        .await
        .unwrap();
    drive.cache.insert("f1", Default::default());

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("ten.txt");
    std::fs::File::create(&file_path)
        .unwrap()
        .write_all(b"0123456789")
        .unwrap();

    let result = transfer::upload_file(&drive, "f1", &file_path).await.unwrap();

    assert_eq!(result.file_name, "ten.txt");
    assert_eq!(result.size, 10);
    assert_eq!(result.total_chunks, 3);
    assert!(drive.progress.is_empty());
    assert!(!drive.cache.contains("f1"));
}

#[tokio::test]
async fn upload_files_reports_each_path() {
    let server = MockServer::start().await;
    accept_uploads(&server, "f1").await;
    let (drive, _events) = common::drive(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
        let path = dir.path().join(name);
        std::fs::write(&path, name).unwrap();
        paths.push(path);
    }
    paths.push(dir.path().join("missing.txt"));

    let results = transfer::upload_files(&drive, "f1", &paths).await;

    assert_eq!(results.len(), 5);
    let failures: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("missing.txt"));
    assert!(drive.progress.is_empty());
}

#[tokio::test]
async fn download_failure_removes_entry_and_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file/f9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let (drive, _events) = common::drive(&server).await;

    let err = transfer::download_file(&drive, "f9", Some("report.pdf"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(drive.progress.get("f9").is_none());
}

#[tokio::test]
async fn named_download_is_tracked_under_file_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 300_000]))
        .mount(&server)
        .await;
    let (drive, mut events) = common::drive(&server).await;

    let bytes = transfer::download_file(&drive, "f1", Some("photo.png"))
        .await
        .unwrap();
    assert_eq!(bytes.len(), 300_000);
    assert!(drive.progress.is_empty());

    let last = common::drain(&mut events)
        .into_iter()
        .filter(|e| e.name == PROGRESS_UPDATED)
        .last()
        .unwrap();
    assert_eq!(last.payload["key"], "f1");
    assert_eq!(last.payload["type"], "download");
    assert_eq!(last.payload["loaded"], 300_000);
    assert_eq!(last.payload["total"], 300_000);
}

#[tokio::test]
async fn unnamed_download_is_not_tracked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
        .mount(&server)
        .await;
    let (drive, mut events) = common::drive(&server).await;

    transfer::download_file(&drive, "f1", None).await.unwrap();

    assert!(common::drain(&mut events)
        .iter()
        .all(|e| e.name != PROGRESS_UPDATED));
}

#[tokio::test]
async fn download_to_file_writes_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file/f2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello drive".to_vec()))
        .mount(&server)
        .await;
    let (drive, _events) = common::drive(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out/notes.txt");
    let written = transfer::download_file_to(&drive, "f2", Some("notes.txt"), &destination)
        .await
        .unwrap();

    assert_eq!(written, 11);
    assert_eq!(std::fs::read(&destination).unwrap(), b"hello drive");
    assert!(drive.progress.is_empty());
}

#[tokio::test]
async fn upload_files_rejects_repeated_file_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/file/f1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (drive, _events) = common::drive(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for sub in ["a", "b"] {
        let folder = dir.path().join(sub);
        std::fs::create_dir_all(&folder).unwrap();
        let path = folder.join("x.txt");
        std::fs::write(&path, sub).unwrap();
        paths.push(path);
    }

    let results = transfer::upload_files(&drive, "f1", &paths).await;

    assert_eq!(results.len(), 2);
    let (rejected, err) = &results[0];
    assert_eq!(rejected, &paths[1]);
    assert!(matches!(err, Err(clouddrive_lib::DriveError::InvalidInput(_))));
    assert!(results[1].1.is_ok());
    assert!(drive.progress.is_empty());
}
