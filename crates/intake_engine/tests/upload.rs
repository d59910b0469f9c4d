use std::fs;
use std::path::Path;
use std::time::Duration;

use intake_engine::{
    FailureKind, ReqwestUploader, UploadFile, UploadRequest, UploadSettings, Uploader,
};
use tempfile::TempDir;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_PATH: &str = "/api/extract-aadhaar";

fn write_file(dir: &Path, name: &str, content: &[u8]) -> UploadFile {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    let mime_type = if name.ends_with(".pdf") {
        "application/pdf"
    } else {
        "image/png"
    };
    UploadFile {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        path,
    }
}

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    ReqwestUploader::new(UploadSettings::new(format!(
        "{}{}",
        server.uri(),
        ENDPOINT_PATH
    )))
}

#[tokio::test]
async fn uploads_all_files_under_shared_field_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let request = UploadRequest {
        attempt: 1,
        field_name: "file".to_string(),
        files: vec![
            write_file(temp.path(), "id.png", b"png-bytes"),
            write_file(temp.path(), "report.pdf", b"pdf-bytes"),
        ],
    };

    let receipt = uploader_for(&server)
        .upload(&request)
        .await
        .expect("upload ok");
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "{\"ok\":true}");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body = String::from_utf8_lossy(&received[0].body).into_owned();
    assert_eq!(body.matches("name=\"file\"").count(), 2);
    let png = body.find("filename=\"id.png\"").expect("png part");
    let pdf = body.find("filename=\"report.pdf\"").expect("pdf part");
    assert!(png < pdf);
    assert!(body.contains("png-bytes"));
    assert!(body.contains("pdf-bytes"));
    assert!(body.contains("application/pdf"));
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let request = UploadRequest {
        attempt: 4,
        field_name: "file".to_string(),
        files: vec![write_file(temp.path(), "id.png", b"x")],
    };

    let err = uploader_for(&server).upload(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn missing_payload_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let request = UploadRequest {
        attempt: 2,
        field_name: "file".to_string(),
        files: vec![UploadFile {
            name: "gone.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            path: temp.path().join("gone.pdf"),
        }],
    };

    let err = uploader_for(&server).upload(&request).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::PayloadUnreadable {
            name: "gone.pdf".to_string()
        }
    );
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let uploader = ReqwestUploader::new(UploadSettings::new("not a url"));
    let request = UploadRequest {
        attempt: 1,
        field_name: "file".to_string(),
        files: Vec::new(),
    };

    let err = uploader.upload(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = UploadSettings {
        request_timeout: Duration::from_millis(50),
        ..UploadSettings::new(format!("{}{}", server.uri(), ENDPOINT_PATH))
    };
    let temp = TempDir::new().unwrap();
    let request = UploadRequest {
        attempt: 3,
        field_name: "file".to_string(),
        files: vec![write_file(temp.path(), "id.png", b"x")],
    };

    let err = ReqwestUploader::new(settings)
        .upload(&request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
