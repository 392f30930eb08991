//! # uni-auth
//!
//! Session handling for unidash.
//!
//! Provides the shared [`SessionContext`] (token + signed-in user), its
//! file-backed [`store::SessionStore`] with `UNIDASH_AUTH__TOKEN` as a
//! fallback for CI, best-effort JWT expiry decoding, and the route
//! [`guard`]. Network calls (login, profile, logout) live in `uni-api`.

pub mod context;
pub mod error;
pub mod guard;
pub mod refresh;
pub mod store;

pub use context::{SessionContext, TokenSource};
pub use error::AuthError;
pub use guard::{Access, Denial, Redirect};
pub use store::SessionStore;
