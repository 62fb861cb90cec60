//! Remote REST API: wire types and the typed client

mod client;
pub mod dto;

pub use client::{fallback, paths, ApiClient};
