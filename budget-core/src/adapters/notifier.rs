//! Notifier that records download completions in the log

use crate::ports::DownloadNotifier;

/// Logs download completions at info level
///
/// Suitable for headless use; front ends supply their own notifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl DownloadNotifier for LogNotifier {
    fn download_complete(&self, title: &str, location: &str) {
        tracing::info!(location, "{}", title);
    }
}
