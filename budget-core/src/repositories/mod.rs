//! Repositories
//!
//! Each repository turns API calls into domain results and applies the
//! local side effects that go with them: caching the signed-in user,
//! normalizing image URLs and saving downloaded reports.

mod auth;
mod dashboard;
mod profile;
mod transactions;

use std::path::Path;

use base64::Engine;

use crate::domain::result::{Error, Result};

pub use auth::AuthRepository;
pub use dashboard::DashboardRepository;
pub use profile::{ProfileRepository, ProfileUpdate};
pub use transactions::TransactionRepository;

/// Make a server-provided image reference usable as-is
///
/// Blank becomes `None`, absolute URLs are upgraded to https and relative
/// paths are resolved against `base_url`.
pub fn resolve_image_url(url: Option<&str>, base_url: &str) -> Option<String> {
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    if url.starts_with("http") {
        return Some(url.replace("http://", "https://"));
    }
    Some(format!("{}{}", base_url.trim_end_matches('/'), url))
}

/// Read an image file into a `data:<mime>;base64,...` URL
pub fn encode_image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Image(format!("Failed to read {}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(Error::Image(format!("{} is empty", path.display())));
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", image_mime(path), encoded))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}
