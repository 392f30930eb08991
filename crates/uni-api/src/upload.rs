//! `POST /data-upload/` multipart endpoint.

use uni_core::responses::UploadResponse;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, FilePart, Method, Transport};

pub const UPLOAD_PATH: &str = "/data-upload/";

/// Form field for a single-file upload.
pub const SINGLE_FIELD: &str = "file";
/// Repeated form field for a multi-file upload.
pub const MULTI_FIELD: &str = "files";

impl<T: Transport> ApiClient<T> {
    /// Upload spreadsheets under `field`. The response body is decoded
    /// leniently: an empty success body reads as an empty summary.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; callers map it to a user-facing message.
    pub async fn upload_files(
        &self,
        field: &str,
        files: Vec<FilePart>,
    ) -> Result<UploadResponse, ApiError> {
        tracing::info!(field, count = files.len(), "uploading data files");
        let response = self
            .execute(ApiRequest::new(Method::Post, UPLOAD_PATH).with_files(field, files))
            .await?;
        if response.body.is_empty() {
            return Ok(UploadResponse::default());
        }
        response.json()
    }
}
