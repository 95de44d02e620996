//! End-to-end tests against a mock HTTP endpoint
//!
//! These tests drive the public API with the real reqwest fetcher:
//! - Both runners write the expected files with the fetched body
//! - HTTP errors abort the sequential run but stay isolated in the concurrent run
//! - Validation failures happen before any request
//! - Reruns overwrite instead of accumulating files

mod common;

use common::*;
use imgfetch::{
    Config, DownloadRequest, Error, FetchError, ImageDownloader, NamePrefix, TaskErrorKind,
    run_comparison,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn both_runs_write_every_file_with_the_fetched_body() {
    let server = MockServer::start().await;
    mount_image(&server).await;
    let (downloader, temp_dir) = create_downloader(&server, 3);

    let sequential = downloader.download_sequential().await.unwrap();
    let concurrent = downloader.download_concurrent().await.unwrap();

    assert!(sequential.is_complete());
    assert!(concurrent.is_complete());
    assert_eq!(sequential.total_bytes(), 3 * IMAGE_BODY.len() as u64);

    let mut expected = expected_names("async", 3);
    expected.extend(expected_names("sync", 3));
    assert_eq!(file_names(temp_dir.path()), expected);

    for name in &expected {
        assert_eq!(std::fs::read(temp_dir.path().join(name)).unwrap(), IMAGE_BODY);
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn sequential_run_halts_at_http_500() {
    let server = MockServer::start().await;
    mount_image_then_error(&server, 1, 500).await;
    let (downloader, temp_dir) = create_downloader(&server, 3);

    let err = downloader.download_sequential().await.unwrap_err();

    assert_eq!(err.task_index(), Some(2));
    match err {
        Error::Task(task) => assert!(matches!(
            task.kind,
            TaskErrorKind::Fetch(FetchError::Status { status: 500, .. })
        )),
        other => panic!("expected Task error, got {other:?}"),
    }
    assert_eq!(file_names(temp_dir.path()), vec!["sync_1.jpg"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_run_isolates_http_500() {
    let server = MockServer::start().await;
    mount_image_then_error(&server, 2, 500).await;
    let (downloader, temp_dir) = create_downloader(&server, 3);

    let report = downloader.download_concurrent().await.unwrap();

    // Completion order decides which task gets the error
    assert_eq!(report.saved.len(), 2);
    assert_eq!(report.failures.len(), 1);
    let failed = report.failures[0].index;
    assert!((1..=3).contains(&failed));

    let expected: Vec<String> = (1..=3)
        .filter(|i| *i != failed)
        .map(|i| format!("async_{i}.jpg"))
        .collect();
    assert_eq!(file_names(temp_dir.path()), expected);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn comparison_continues_after_sequential_failure() {
    let server = MockServer::start().await;
    mount_error_then_image(&server, 1, 503).await;
    let (downloader, temp_dir) = create_downloader(&server, 3);

    let comparison = run_comparison(&downloader).await;

    let sequential = comparison.sequential.as_ref().unwrap_err();
    assert_eq!(sequential.task_index(), Some(1));

    let concurrent = comparison.concurrent.as_ref().unwrap();
    assert!(concurrent.is_complete());
    assert!(!comparison.is_success());
    assert!(comparison.speedup().is_none());

    assert_eq!(file_names(temp_dir.path()), expected_names("async", 3));
}

#[tokio::test]
async fn comparison_is_idempotent() {
    let server = MockServer::start().await;
    mount_image(&server).await;
    let (downloader, temp_dir) = create_downloader(&server, 5);

    let first = run_comparison(&downloader).await;
    let second = run_comparison(&downloader).await;

    assert!(first.is_success());
    assert!(second.is_success());
    assert!(second.speedup().is_some());

    let mut expected = expected_names("async", 5);
    expected.extend(expected_names("sync", 5));
    assert_eq!(file_names(temp_dir.path()), expected);
}

#[tokio::test]
async fn invalid_path_sends_no_request_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing");
    let request = DownloadRequest::new(&missing, image_url(&server), 3);
    let downloader = ImageDownloader::new(Config::new(request)).unwrap();

    let comparison = run_comparison(&downloader).await;

    for phase in [&comparison.sequential, &comparison.concurrent] {
        let err = phase.as_ref().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "path", .. }));
        assert_eq!(err.exit_code(), 2);
    }
    assert!(!missing.exists());
    assert!(file_names(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn zero_count_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (downloader, temp_dir) = create_downloader(&server, 0);

    let err = downloader.download_concurrent().await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput { field: "count", .. }));
    assert!(file_names(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn sequential_and_concurrent_can_share_a_prefix() {
    let server = MockServer::start().await;
    mount_image(&server).await;
    let (downloader, temp_dir) = create_downloader(&server, 2);

    downloader
        .download_sequential_as(NamePrefix::Async)
        .await
        .unwrap();
    downloader.download_concurrent().await.unwrap();

    assert_eq!(file_names(temp_dir.path()), expected_names("async", 2));
}
