//! Common test utilities for imgfetch integration tests

#![allow(dead_code)]

use imgfetch::{Config, DownloadRequest, ImageDownloader};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed body served by the mock endpoint
pub const IMAGE_BODY: &[u8] = b"\xff\xd8\xff\xe0 integration image body";

/// Path of the mock image endpoint
pub const IMAGE_PATH: &str = "/img";

/// URL of the mock image endpoint
pub fn image_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), IMAGE_PATH)
}

/// Endpoint that always answers 200 with [`IMAGE_BODY`]
pub async fn mount_image(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(IMAGE_BODY))
        .mount(server)
        .await;
}

/// The first `ok` requests get 200, every later one gets `status`
pub async fn mount_image_then_error(server: &MockServer, ok: u64, status: u16) {
    Mock::given(method("GET"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(IMAGE_BODY))
        .up_to_n_times(ok)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(status))
        .with_priority(2)
        .mount(server)
        .await;
}

/// The first `failing` requests get `status`, every later one gets 200
pub async fn mount_error_then_image(server: &MockServer, failing: u64, status: u16) {
    Mock::given(method("GET"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(status))
        .up_to_n_times(failing)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(IMAGE_BODY))
        .with_priority(2)
        .mount(server)
        .await;
}

/// Downloader for `count` copies of the mock image into a fresh temp dir
pub fn create_downloader(server: &MockServer, count: usize) -> (ImageDownloader, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let request = DownloadRequest::new(temp_dir.path(), image_url(server), count);
    let downloader =
        ImageDownloader::new(Config::new(request)).expect("Failed to create downloader");
    (downloader, temp_dir)
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Expected names `{prefix}_1.jpg ..= {prefix}_{count}.jpg`, sorted like [`file_names`]
pub fn expected_names(prefix: &str, count: usize) -> Vec<String> {
    let mut names: Vec<String> = (1..=count).map(|i| format!("{prefix}_{i}.jpg")).collect();
    names.sort();
    names
}
