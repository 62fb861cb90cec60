//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The session layer,
//! repositories and controllers depend only on these traits.

mod http;
mod notifier;
mod storage;

pub use http::{HttpRequest, HttpResponse, HttpTransport};
pub use notifier::DownloadNotifier;
pub use storage::KeyValueStore;
