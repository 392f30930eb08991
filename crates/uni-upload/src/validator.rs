//! Client-side file checks run before anything is sent.

use std::path::{Path, PathBuf};

use uni_api::FilePart;
use uni_config::UploadConfig;

use crate::error::{FileRejection, UploadError};

const EXCEL_ONLY: &[&str] = &[".xlsx", ".xls"];
const EXCEL_AND_CSV: &[&str] = &[".xlsx", ".xls", ".csv"];

/// A file the user picked, as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Read name and size from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Io`] if the file metadata cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| UploadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        Ok(Self::new(name, metadata.len(), path))
    }

    /// MIME type declared for the multipart part, derived from the extension.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        let name = self.name.to_lowercase();
        if name.ends_with(".xlsx") {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        } else if name.ends_with(".xls") {
            "application/vnd.ms-excel"
        } else if name.ends_with(".csv") {
            "text/csv"
        } else {
            "application/octet-stream"
        }
    }

    #[must_use]
    pub fn to_part(&self) -> FilePart {
        FilePart {
            file_name: self.name.clone(),
            path: self.path.clone(),
            content_type: self.content_type().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_extensions: &'static [&'static str],
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

impl UploadPolicy {
    #[must_use]
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            allowed_extensions: if config.allow_csv {
                EXCEL_AND_CSV
            } else {
                EXCEL_ONLY
            },
            max_file_size: config.max_file_size_bytes,
            max_files: config.max_files,
        }
    }

    /// Same limits, `.csv` accepted as well.
    #[must_use]
    pub const fn with_csv(mut self) -> Self {
        self.allowed_extensions = EXCEL_AND_CSV;
        self
    }

    fn accepts_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| name.ends_with(ext))
    }
}

/// Check one file. Presence, then extension, then size; the first failure wins.
///
/// # Errors
///
/// Returns the [`FileRejection`] for the first rule the file breaks.
pub fn validate(file: Option<&CandidateFile>, policy: &UploadPolicy) -> Result<(), FileRejection> {
    let Some(file) = file else {
        return Err(FileRejection::Missing);
    };
    if !policy.accepts_name(&file.name) {
        return Err(FileRejection::UnsupportedType {
            allowed: policy.allowed_extensions,
        });
    }
    if file.size > policy.max_file_size {
        return Err(FileRejection::TooLarge {
            limit_bytes: policy.max_file_size,
        });
    }
    Ok(())
}

/// Check a multi-file batch. Files are checked in order and the first
/// rejection, tagged with the file name, wins.
///
/// # Errors
///
/// Returns [`FileRejection::Missing`] for an empty batch,
/// [`FileRejection::TooMany`] past `max_files`, or [`FileRejection::InBatch`].
pub fn validate_batch(files: &[CandidateFile], policy: &UploadPolicy) -> Result<(), FileRejection> {
    if files.is_empty() {
        return Err(FileRejection::Missing);
    }
    if files.len() > policy.max_files {
        return Err(FileRejection::TooMany {
            max: policy.max_files,
        });
    }
    for file in files {
        validate(Some(file), policy).map_err(|reason| FileRejection::InBatch {
            file: file.name.clone(),
            reason: Box::new(reason),
        })?;
    }
    Ok(())
}
