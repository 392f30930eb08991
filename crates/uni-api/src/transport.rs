//! Request/response model and the transport seam.
//!
//! Everything above this module speaks [`ApiRequest`] / [`ApiResponse`]; only
//! [`HttpTransport`] knows about reqwest. Tests swap in `MockTransport`.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uni_config::ApiConfig;

use crate::error::ApiError;
use crate::http::read_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A local file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Every file is sent under the same form field.
    Multipart { field: String, files: Vec<FilePart> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, with leading and trailing slash.
    pub path: String,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn with_files(mut self, field: impl Into<String>, files: Vec<FilePart>) -> Self {
        self.body = RequestBody::Multipart {
            field: field.into(),
            files,
        };
        self
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Multipart requests get the longer upload timeout.
    #[must_use]
    pub const fn is_upload(&self) -> bool {
        matches!(self.body, RequestBody::Multipart { .. })
    }
}

/// A response that was received, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `D`.
    pub fn json<D: DeserializeOwned>(&self) -> Result<D, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends one request and returns the response, or an error when no response
/// was received at all. Non-success statuses are *not* errors at this layer.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: ApiRequest)
    -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// reqwest-backed transport rooted at the configured base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    upload_timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the underlying client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("unidash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            request_timeout: config.request_timeout(),
            upload_timeout: config.upload_timeout(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let timeout = if request.is_upload() {
            self.upload_timeout
        } else {
            self.request_timeout
        };
        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), &url)
            .timeout(timeout);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart { field, files } => {
                builder.multipart(multipart_form(&field, files).await?)
            }
        };

        let response = read_response(builder.send().await?).await?;
        tracing::debug!(status = response.status, %url, "response received");
        Ok(response)
    }
}

async fn multipart_form(field: &str, files: Vec<FilePart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for file in files {
        let bytes = tokio::fs::read(&file.path).await?;
        let part = Part::bytes(bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        form = form.part(field.to_string(), part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multipart_requests_are_uploads() {
        let file = FilePart {
            file_name: "data.xlsx".into(),
            path: PathBuf::from("/tmp/data.xlsx"),
            content_type: "application/vnd.ms-excel".into(),
        };
        let request = ApiRequest::new(Method::Post, "/data-upload/").with_files("file", vec![file]);
        assert!(request.is_upload());
        assert!(!ApiRequest::get("/dashboard/summary/").is_upload());
    }

    #[test]
    fn response_json_decodes_body() {
        let response = ApiResponse {
            status: 200,
            body: br#"{"is_empty": true}"#.to_vec(),
        };
        assert!(response.is_success());
        let value: Value = response.json().unwrap();
        assert_eq!(value, json!({"is_empty": true}));

        let bad = ApiResponse {
            status: 200,
            body: b"<html>".to_vec(),
        };
        assert!(matches!(bad.json::<Value>(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn http_transport_uses_configured_base() {
        let config = ApiConfig {
            base_url: "http://backend:8000/api/".into(),
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://backend:8000/api");
    }
}
