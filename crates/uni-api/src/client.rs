//! The backend client.
//!
//! Endpoint groups (`crud`, `auth`, `dashboard`, `upload`) add their methods
//! to [`ApiClient`] in their own modules.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use uni_auth::SessionContext;
use uni_config::ApiConfig;

use crate::error::ApiError;
use crate::http::check_response;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

/// Cheap to clone; clones share the transport and the session.
#[derive(Debug)]
pub struct ApiClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    session: SessionContext,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: self.session.clone(),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Client over HTTP using the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig, session: SessionContext) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(config)?, session))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: SessionContext) -> Self {
        Self::with_shared(Arc::new(transport), session)
    }

    pub const fn with_shared(transport: Arc<T>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request with the session's bearer token.
    ///
    /// A 401 clears the session (memory and disk) before the error is
    /// returned, so the next guard check sends the user to login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unreachable`] when no response arrives and
    /// [`ApiError::Status`] for non-success statuses.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = request.with_bearer(self.session.token());
        let method = request.method;
        let path = request.path.clone();

        let result = self.transport.send(request).await.and_then(check_response);
        match &result {
            Err(error) if error.is_unauthorized() => {
                tracing::warn!(method = method.as_str(), %path, "unauthorized; clearing session");
                if let Err(error) = self.session.clear() {
                    tracing::warn!(%error, "failed to clear session");
                }
            }
            Err(error) => {
                tracing::debug!(method = method.as_str(), %path, %error, "request failed");
            }
            Ok(_) => {}
        }
        result
    }

    /// `GET path` decoded as `D`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute); also [`ApiError::Decode`].
    pub async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        self.execute(ApiRequest::get(path)).await?.json()
    }

    /// `method path` with a JSON body, response decoded as `D`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute); also [`ApiError::Decode`].
    pub async fn send_json<D: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> Result<D, ApiError> {
        self.execute(ApiRequest::new(method, path).with_json(body))
            .await?
            .json()
    }

    /// `method path` without a body; the response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::new(method, path)).await.map(drop)
    }
}
