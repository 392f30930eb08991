//! The upload workflow: `Idle → Selected → Uploading → Success | Error`.

use tokio::sync::watch;
use uni_api::events::{DataEvent, InvalidationBus};
use uni_api::upload::{MULTI_FIELD, SINGLE_FIELD};
use uni_api::{ApiClient, HttpTransport, Transport};
use uni_config::UploadConfig;
use uni_core::responses::UploadSummary;

use crate::error::{FileRejection, UploadError};
use crate::feedback::failure_message;
use crate::progress::{ProgressTicker, ProgressTiming};
use crate::validator::{CandidateFile, UploadPolicy, validate, validate_batch};

/// Exactly one outcome is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Selected,
    /// Percent shown to the user.
    Uploading(u8),
    Success(UploadSummary),
    /// User-facing failure text (a rejection or a mapped request failure).
    Error(String),
}

impl UploadState {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Drives one upload page. `upload` takes `&mut self`, so a second upload
/// cannot start while one is in flight.
#[derive(Debug)]
pub struct UploadController<T: Transport = HttpTransport> {
    client: ApiClient<T>,
    policy: UploadPolicy,
    timing: ProgressTiming,
    selection: Vec<CandidateFile>,
    multi: bool,
    state: UploadState,
    progress: watch::Sender<u8>,
    bus: Option<InvalidationBus>,
}

impl<T: Transport> UploadController<T> {
    pub fn new(client: ApiClient<T>, config: &UploadConfig) -> Self {
        Self::with_policy(client, UploadPolicy::from_config(config), config.into())
    }

    pub fn with_policy(client: ApiClient<T>, policy: UploadPolicy, timing: ProgressTiming) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            client,
            policy,
            timing,
            selection: Vec::new(),
            multi: false,
            state: UploadState::Idle,
            progress,
            bus: None,
        }
    }

    /// Announce successful uploads on `bus` so open pages refetch.
    #[must_use]
    pub fn with_bus(mut self, bus: InvalidationBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Current state; while uploading, the percent is read live.
    #[must_use]
    pub fn state(&self) -> UploadState {
        match self.state {
            UploadState::Uploading(_) => UploadState::Uploading(self.progress()),
            ref other => other.clone(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        *self.progress.borrow()
    }

    #[must_use]
    pub fn selection(&self) -> &[CandidateFile] {
        &self.selection
    }

    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Receiver for live progress while a request is in flight.
    #[must_use]
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Pick a single file, replacing any earlier selection.
    ///
    /// # Errors
    ///
    /// Returns the [`FileRejection`]; the state becomes `Error` and nothing
    /// is retained.
    pub fn select_file(&mut self, file: Option<CandidateFile>) -> Result<(), FileRejection> {
        let outcome = validate(file.as_ref(), &self.policy);
        self.apply_selection(outcome, file.into_iter().collect(), false)
    }

    /// Pick a batch, submitted under the repeated `files` field.
    ///
    /// # Errors
    ///
    /// Returns the first [`FileRejection`] in the batch.
    pub fn select_files(&mut self, files: Vec<CandidateFile>) -> Result<(), FileRejection> {
        let outcome = validate_batch(&files, &self.policy);
        self.apply_selection(outcome, files, true)
    }

    fn apply_selection(
        &mut self,
        outcome: Result<(), FileRejection>,
        files: Vec<CandidateFile>,
        multi: bool,
    ) -> Result<(), FileRejection> {
        self.progress.send_replace(0);
        match outcome {
            Ok(()) => {
                tracing::debug!(count = files.len(), multi, "files selected");
                self.selection = files;
                self.multi = multi;
                self.state = UploadState::Selected;
                Ok(())
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "selection rejected");
                self.selection.clear();
                self.state = UploadState::Error(rejection.to_string());
                Err(rejection)
            }
        }
    }

    /// Send the selection.
    ///
    /// Progress climbs on a timer while the request is in flight and snaps
    /// to 100 on success. The ticker is stopped on every outcome. A
    /// successful upload clears the selection and publishes
    /// [`DataEvent::DatasetReplaced`]; a failed one keeps it for
    /// [`retry`](Self::retry).
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NotReady`] outside the `Selected` state (no
    /// request is made) and [`UploadError::Failed`] when the request fails.
    pub async fn upload(&mut self) -> Result<UploadSummary, UploadError> {
        if self.state != UploadState::Selected || self.selection.is_empty() {
            return Err(UploadError::NotReady);
        }

        let field = if self.multi { MULTI_FIELD } else { SINGLE_FIELD };
        let parts = self.selection.iter().map(CandidateFile::to_part).collect();

        self.progress.send_replace(0);
        self.state = UploadState::Uploading(0);
        let ticker = ProgressTicker::start(self.progress.clone(), self.timing);
        let result = self.client.upload_files(field, parts).await;
        ticker.stop();

        match result {
            Ok(response) => {
                self.progress.send_replace(100);
                let summary = UploadSummary::from(response);
                tracing::info!(%summary, "upload finished");
                self.selection.clear();
                self.state = UploadState::Success(summary.clone());
                if let Some(bus) = &self.bus {
                    bus.publish(DataEvent::DatasetReplaced);
                }
                Ok(summary)
            }
            Err(source) => {
                let message = failure_message(&source);
                tracing::warn!(error = %source, "upload failed");
                self.state = UploadState::Error(message.clone());
                Err(UploadError::Failed { message, source })
            }
        }
    }

    /// Re-send the selection after a failed request.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NotReady`] unless the last request failed with
    /// the selection still held; otherwise as [`upload`](Self::upload).
    pub async fn retry(&mut self) -> Result<UploadSummary, UploadError> {
        if !self.state.is_error() || self.selection.is_empty() {
            return Err(UploadError::NotReady);
        }
        self.state = UploadState::Selected;
        self.upload().await
    }

    /// Back to `Idle` from any state.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.multi = false;
        self.progress.send_replace(0);
        self.state = UploadState::Idle;
    }
}
