//! Generic CRUD over `/dashboard/{resource}/`.
//!
//! Direct passthrough: no retry, no caching, no optimistic mutation.
//! Callers refetch after every mutation.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uni_core::resource::Resource;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{Method, Transport};

/// The backend returns bare arrays; a paginated envelope is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListPayload<T> {
    fn into_rows(self) -> Vec<T> {
        match self {
            Self::Plain(rows) | Self::Paged { results: rows } => rows,
        }
    }
}

#[must_use]
pub fn collection_path(resource: &str) -> String {
    format!("/dashboard/{resource}/")
}

#[must_use]
pub fn record_path(resource: &str, id: i64) -> String {
    format!("/dashboard/{resource}/{id}/")
}

impl<T: Transport> ApiClient<T> {
    /// List every record of `R`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or rows cannot be decoded.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.list_path(R::PATH).await
    }

    /// List a collection as raw JSON rows (used for parent select options).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a list.
    pub async fn list_raw(&self, resource: &str) -> Result<Vec<Value>, ApiError> {
        self.list_path(resource).await
    }

    async fn list_path<D: DeserializeOwned>(&self, resource: &str) -> Result<Vec<D>, ApiError> {
        let payload: ListPayload<D> = self.get_json(&collection_path(resource)).await?;
        Ok(payload.into_rows())
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a missing record is `ApiError::Status { status: 404, .. }`.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        self.get_json(&record_path(R::PATH, id)).await
    }

    /// `POST` a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the payload.
    pub async fn create<R: Resource>(&self, payload: Value) -> Result<R, ApiError> {
        tracing::info!(resource = R::PATH, "creating record");
        self.send_json(Method::Post, &collection_path(R::PATH), payload)
            .await
    }

    /// `PUT` a full replacement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the payload.
    pub async fn update<R: Resource>(&self, id: i64, payload: Value) -> Result<R, ApiError> {
        tracing::info!(resource = R::PATH, id, "updating record");
        self.send_json(Method::Put, &record_path(R::PATH, id), payload)
            .await
    }

    /// `PATCH` selected fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the payload.
    pub async fn patch<R: Resource>(&self, id: i64, payload: Value) -> Result<R, ApiError> {
        tracing::info!(resource = R::PATH, id, "patching record");
        self.send_json(Method::Patch, &record_path(R::PATH, id), payload)
            .await
    }

    /// `DELETE` one record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`], typically a 4xx/5xx when dependent records exist.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        tracing::info!(resource = R::PATH, id, "deleting record");
        self.send_empty(Method::Delete, &record_path(R::PATH, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uni_auth::SessionContext;
    use uni_core::entities::{College, Department};

    fn client(mock: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock, SessionContext::in_memory())
    }

    #[tokio::test]
    async fn list_accepts_plain_and_paged() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Get,
            "/dashboard/colleges/",
            200,
            json!([{"id": 1, "name": "Engineering"}]),
        );
        mock.reply(
            Method::Get,
            "/dashboard/departments/",
            200,
            json!({"count": 1, "results": [{"id": 5, "college": 1, "name": "EE"}]}),
        );
        let client = client(mock);

        let colleges: Vec<College> = client.list().await.unwrap();
        assert_eq!(colleges[0].name, "Engineering");
        let departments: Vec<Department> = client.list().await.unwrap();
        assert_eq!(departments[0].id, 5);
    }

    #[tokio::test]
    async fn mutations_use_expected_verbs_and_paths() {
        let mock = MockTransport::new();
        let row = json!({"id": 3, "name": "Science"});
        mock.reply(Method::Post, "/dashboard/colleges/", 201, row.clone());
        mock.reply(Method::Put, "/dashboard/colleges/3/", 200, row.clone());
        mock.reply(Method::Patch, "/dashboard/colleges/3/", 200, row);
        mock.reply(Method::Delete, "/dashboard/colleges/3/", 204, Value::Null);
        let client = client(mock);

        let created: College = client.create(json!({"name": "Science"})).await.unwrap();
        assert_eq!(created.id, 3);
        client
            .update::<College>(3, json!({"name": "Science"}))
            .await
            .unwrap();
        client
            .patch::<College>(3, json!({"name": "Science"}))
            .await
            .unwrap();
        client.delete::<College>(3).await.unwrap();

        let verbs: Vec<Method> = client
            .transport()
            .requests()
            .iter()
            .map(|r| r.method)
            .collect();
        assert_eq!(
            verbs,
            vec![Method::Post, Method::Put, Method::Patch, Method::Delete]
        );
    }

    #[tokio::test]
    async fn missing_record_is_404() {
        let client = client(MockTransport::new());
        let err = client.get::<College>(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
