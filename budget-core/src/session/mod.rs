//! Session layer: persisted credentials, the invalidation bus and the
//! request pipeline that ties them to every API call.

mod bus;
pub mod credentials;
mod pipeline;

pub use bus::{SessionBus, SessionInvalidated};
pub use credentials::CredentialStore;
pub use pipeline::RequestPipeline;
