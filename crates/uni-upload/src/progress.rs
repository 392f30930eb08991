//! Simulated upload progress.
//!
//! The backend reports nothing while it parses the workbook, so progress is
//! advanced on a timer up to a ceiling and snapped to 100 by the controller
//! once the request settles.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uni_config::UploadConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTiming {
    pub step: u8,
    pub ceiling: u8,
    pub interval: Duration,
}

impl From<&UploadConfig> for ProgressTiming {
    fn from(config: &UploadConfig) -> Self {
        Self {
            step: config.progress_step,
            ceiling: config.progress_ceiling,
            interval: Duration::from_millis(config.progress_interval_ms),
        }
    }
}

impl Default for ProgressTiming {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

/// Background task adding `step` every `interval` until `ceiling`.
/// Aborted by [`stop`](Self::stop) or on drop.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(progress: watch::Sender<u8>, timing: ProgressTiming) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(timing.interval);
            // The first tick completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                let mut reached = false;
                progress.send_modify(|value| {
                    *value = value.saturating_add(timing.step).min(timing.ceiling);
                    reached = *value >= timing.ceiling;
                });
                if reached {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
