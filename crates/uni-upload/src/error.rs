//! Upload error types.

use thiserror::Error;
use uni_api::ApiError;

/// Why a file (or batch) was refused before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("select a file")]
    Missing,

    #[error("unsupported file type (allowed: {})", .allowed.join(", "))]
    UnsupportedType { allowed: &'static [&'static str] },

    #[error("file too large (limit {} MB)", .limit_bytes / (1024 * 1024))]
    TooLarge { limit_bytes: u64 },

    #[error("too many files (at most {max} per upload)")]
    TooMany { max: usize },

    /// A file inside a multi-file batch was refused.
    #[error("{file}: {reason}")]
    InBatch {
        file: String,
        reason: Box<FileRejection>,
    },
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// `upload()` was called without a valid selection, or while a previous
    /// outcome is still showing.
    #[error("no file selected for upload")]
    NotReady,

    #[error(transparent)]
    Rejected(#[from] FileRejection),

    /// The request failed; `message` is the user-facing text.
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
