//! # uni-api
//!
//! Backend client for unidash.
//!
//! - [`transport`]: the request/response model, the [`Transport`] seam, and
//!   the reqwest-backed [`HttpTransport`]
//! - [`ApiClient`]: bearer-token handling and the 401 session reset, with
//!   endpoint groups for generic CRUD, auth, the dashboard summary, and
//!   data upload
//! - [`page::EntityPage`]: the list/edit page shared by all seven entities
//! - [`dashboard::DashboardView`]: per-panel empty states and number formatting
//! - [`events::InvalidationBus`]: cross-page "data replaced" notifications

pub mod auth;
pub mod client;
pub mod crud;
pub mod dashboard;
pub mod events;
pub mod page;
pub mod transport;
pub mod upload;

mod error;
mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use client::ApiClient;
pub use error::{ApiError, PageError};
pub use transport::{ApiRequest, ApiResponse, FilePart, HttpTransport, Method, Transport};
