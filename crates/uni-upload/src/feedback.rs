//! Map a failed upload to the message the user sees.

use serde_json::Value;
use uni_api::ApiError;

pub const INVALID_FORMAT: &str = "invalid data format";
pub const ADMIN_ONLY: &str = "only administrators can use this feature";
pub const PAYLOAD_TOO_LARGE: &str =
    "file too large; reduce the file size or split the data and try again";
pub const SERVER_ERROR: &str = "server error; please try again later";
pub const UNREACHABLE: &str =
    "cannot reach the server; check your network connection and try again";
pub const GENERIC: &str = "an error occurred while processing the data";

/// User-facing message for a failed upload request.
///
/// A 400 carries the server message followed by one line per entry of its
/// `details` list; 403, 413 and 500 have fixed messages whatever the body.
#[must_use]
pub fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unreachable { .. } => UNREACHABLE.to_string(),
        ApiError::Status {
            status: 400, body, ..
        } => {
            let mut message = error.server_message().unwrap_or(INVALID_FORMAT).to_string();
            if let Some(Value::Array(details)) = &body.details {
                for detail in details {
                    message.push('\n');
                    match detail {
                        Value::String(line) => message.push_str(line),
                        other => message.push_str(&other.to_string()),
                    }
                }
            }
            message
        }
        ApiError::Status { status: 403, .. } => ADMIN_ONLY.to_string(),
        ApiError::Status { status: 413, .. } => PAYLOAD_TOO_LARGE.to_string(),
        ApiError::Status { status: 500, .. } => SERVER_ERROR.to_string(),
        ApiError::Status { .. } => error.server_message().unwrap_or(GENERIC).to_string(),
        other => {
            tracing::debug!(error = %other, "upload failed without a status");
            GENERIC.to_string()
        }
    }
}
