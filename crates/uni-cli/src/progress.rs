use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ui;

/// Terminal bar mirroring the upload controller's progress channel.
pub struct UploadBar {
    bar: Option<ProgressBar>,
    follower: Option<JoinHandle<()>>,
}

impl UploadBar {
    /// Start following `progress`; a no-op when progress output is off.
    #[must_use]
    pub fn follow(mut progress: watch::Receiver<u8>, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self {
                bar: None,
                follower: None,
            };
        }

        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{wide_bar:.cyan/blue} {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());

        let follower = {
            let bar = bar.clone();
            tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    let percent = *progress.borrow_and_update();
                    bar.set_position(u64::from(percent));
                }
            })
        };
        Self {
            bar: Some(bar),
            follower: Some(follower),
        }
    }

    pub fn finish_ok(self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_position(100);
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(self) {
        if let Some(bar) = &self.bar {
            bar.abandon();
        }
    }
}

impl Drop for UploadBar {
    fn drop(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
        }
    }
}
