//! Request pipeline
//!
//! Every API call goes through [`RequestPipeline::execute`], which attaches
//! the bearer token and turns a 401 into a forced logout.

use std::sync::Arc;
use std::time::Instant;

use super::{CredentialStore, SessionBus};
use crate::domain::result::Result;
use crate::ports::{HttpRequest, HttpResponse, HttpTransport};

pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
    bus: SessionBus,
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
        bus: SessionBus,
    ) -> Self {
        Self {
            transport,
            credentials,
            bus,
        }
    }

    pub fn bus(&self) -> &SessionBus {
        &self.bus
    }

    /// Send a request; status and body come back untouched
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = self.authorize(request);
        let method = request.method.clone();
        let path = request.path.clone();
        let started = Instant::now();

        let response = self.transport.send(request).await;

        match &response {
            Ok(res) => {
                tracing::debug!(
                    %method,
                    path = %path,
                    status = res.status,
                    bytes = res.body.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "api exchange"
                );
                if res.is_unauthorized() {
                    tracing::info!(path = %path, "received 401, forcing logout");
                    if let Err(e) = self.bus.trigger_logout() {
                        tracing::warn!("Failed to clear credentials after 401: {}", e);
                    }
                }
            }
            Err(e) => {
                tracing::debug!(%method, path = %path, error = %e, "api exchange failed");
            }
        }

        response
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match self.credentials.token() {
            Ok(Some(token)) => request.with_header("Authorization", format!("Bearer {}", token)),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!("Failed to read auth token: {}", e);
                request
            }
        }
    }
}
