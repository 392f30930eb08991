//! End-to-end upload outcomes against a scripted backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use uni_api::mock::MockTransport;
use uni_api::upload::UPLOAD_PATH;
use uni_api::{ApiClient, Method};
use uni_auth::SessionContext;
use uni_config::UploadConfig;
use uni_upload::feedback::ADMIN_ONLY;
use uni_upload::{CandidateFile, FileRejection, UploadController, UploadError, UploadState};

const MIB: u64 = 1024 * 1024;

fn controller(mock: MockTransport) -> UploadController<MockTransport> {
    let session = SessionContext::in_memory();
    session.set_token("admin-token");
    UploadController::new(ApiClient::new(mock, session), &UploadConfig::default())
}

#[tokio::test]
async fn five_megabyte_workbook_reports_counts() {
    let mock = MockTransport::new();
    mock.reply(Method::Post, UPLOAD_PATH, 200, json!({"details": {"students": 10}}));
    let mut controller = controller(mock);

    controller
        .select_file(Some(CandidateFile::new("roster.xlsx", 5 * MIB, "roster.xlsx")))
        .unwrap();
    controller.upload().await.unwrap();

    let UploadState::Success(summary) = controller.state() else {
        panic!("expected success, got {:?}", controller.state());
    };
    assert!(summary.to_string().contains("10"));
}

#[tokio::test]
async fn oversize_workbook_never_reaches_backend() {
    let mut controller = controller(MockTransport::new());

    let err = controller
        .select_file(Some(CandidateFile::new("huge.xlsx", 12 * MIB, "huge.xlsx")))
        .unwrap_err();
    assert!(matches!(err, FileRejection::TooLarge { .. }));
    assert!(matches!(controller.state(), UploadState::Error(ref m) if m.starts_with("file too large")));

    assert!(matches!(controller.upload().await, Err(UploadError::NotReady)));
}

#[tokio::test]
async fn forbidden_shows_admin_only_message() {
    let mock = MockTransport::new();
    mock.reply(
        Method::Post,
        UPLOAD_PATH,
        403,
        json!({"message": "permission denied", "code": "FORBIDDEN"}),
    );
    let mut controller = controller(mock);
    controller
        .select_file(Some(CandidateFile::new("data.xls", 1024, "data.xls")))
        .unwrap();

    let err = controller.upload().await.unwrap_err();
    assert!(matches!(err, UploadError::Failed { .. }));
    assert_eq!(controller.state(), UploadState::Error(ADMIN_ONLY.to_string()));
}

#[tokio::test]
async fn bad_request_lists_row_errors() {
    let mock = MockTransport::new();
    mock.reply(
        Method::Post,
        UPLOAD_PATH,
        400,
        json!({"message": "bad format", "details": ["row 3 invalid", "row 7 invalid"]}),
    );
    let mut controller = controller(mock);
    controller
        .select_file(Some(CandidateFile::new("data.xlsx", 1024, "data.xlsx")))
        .unwrap();

    controller.upload().await.unwrap_err();
    let UploadState::Error(message) = controller.state() else {
        panic!("expected error state");
    };
    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines, vec!["bad format", "row 3 invalid", "row 7 invalid"]);
}

#[tokio::test]
async fn bearer_token_rides_along() {
    let mock = MockTransport::new();
    mock.reply(Method::Post, UPLOAD_PATH, 200, json!({}));
    let mut controller = controller(mock);
    controller
        .select_file(Some(CandidateFile::new("data.xlsx", 1, "data.xlsx")))
        .unwrap();
    let summary = controller.upload().await.unwrap();
    assert_eq!(summary.to_string(), "data uploaded successfully");

    let sent = controller.client().transport().requests();
    assert_eq!(sent[0].bearer.as_deref(), Some("admin-token"));
}
