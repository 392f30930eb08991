pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod entity;
pub mod schema;
pub mod shared;
pub mod upload;
