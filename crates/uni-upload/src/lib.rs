//! # uni-upload
//!
//! Bulk data upload for unidash: spreadsheets are checked locally, sent as
//! multipart, and the outcome is mapped to a message the user can act on.

pub mod controller;
pub mod feedback;
pub mod progress;
pub mod validator;

mod error;

pub use controller::{UploadController, UploadState};
pub use error::{FileRejection, UploadError};
pub use feedback::failure_message;
pub use validator::{CandidateFile, UploadPolicy, validate, validate_batch};
