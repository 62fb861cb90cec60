//! Download-complete notification port

/// Surfaces a "download complete" notification to the user
///
/// Implementations decide how (desktop notification, terminal line, log).
/// The caller has already checked the user's notification preference.
pub trait DownloadNotifier: Send + Sync {
    fn download_complete(&self, title: &str, location: &str);
}
