//! Shared HTTP response helpers.
//!
//! Centralizes the status-code check (non-success → [`ApiError::Status`] with
//! the parsed error body) so endpoint modules stay focused on request
//! construction and response mapping.

use uni_core::responses::ErrorBody;

use crate::error::ApiError;
use crate::transport::ApiResponse;

/// Drain a reqwest response into an [`ApiResponse`].
pub async fn read_response(resp: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = resp.status().as_u16();
    let body = resp.bytes().await?.to_vec();
    Ok(ApiResponse { status, body })
}

/// Check a response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body is parsed as
/// the backend's `{message, details}` envelope; a body that is not JSON (a
/// proxy error page, for instance) yields an empty [`ErrorBody`].
pub fn check_response(resp: ApiResponse) -> Result<ApiResponse, ApiError> {
    if resp.is_success() {
        return Ok(resp);
    }
    let body = serde_json::from_slice::<ErrorBody>(&resp.body).unwrap_or_default();
    Err(ApiError::Status {
        status: resp.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = read_response(mock_response(200, "[]")).await.unwrap();
        assert!(check_response(resp).is_ok());
    }

    #[tokio::test]
    async fn check_response_parses_error_body() {
        let resp = read_response(mock_response(
            400,
            r#"{"status":"error","message":"bad format","details":["row 3"]}"#,
        ))
        .await
        .unwrap();
        let err = check_response(resp).unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.message.as_deref(), Some("bad format"));
                assert_eq!(body.details, Some(json!(["row 3"])));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_empty() {
        let resp = read_response(mock_response(413, "<html>Request Entity Too Large</html>"))
            .await
            .unwrap();
        let err = check_response(resp).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 413, .. }));
        assert_eq!(err.server_message(), None);
    }
}
