//! Income and expense repository
//!
//! One type serves both lists; the kind picks the endpoints, the wire label
//! field and the messages.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::adapters::downloads::DownloadsFolder;
use crate::api::dto::{AddTransactionResponse, DeleteResponse};
use crate::api::ApiClient;
use crate::domain::result::{Error, Result};
use crate::domain::{NewTransaction, Transaction, TransactionKind};

pub const FAILED_TO_CREATE_FILE: &str = "Failed to create file";

pub struct TransactionRepository {
    kind: TransactionKind,
    api: Arc<ApiClient>,
    downloads: DownloadsFolder,
}

impl TransactionRepository {
    pub fn new(kind: TransactionKind, api: Arc<ApiClient>, downloads: DownloadsFolder) -> Self {
        Self {
            kind,
            api,
            downloads,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub async fn all(&self) -> Result<Vec<Transaction>> {
        self.api.transactions(self.kind).await
    }

    pub async fn add(&self, request: &NewTransaction) -> Result<AddTransactionResponse> {
        self.api.add_transaction(self.kind, request).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResponse> {
        self.api.delete_transaction(self.kind, id).await
    }

    /// Download the spreadsheet report and save it to the downloads folder
    pub async fn download_report(&self) -> Result<PathBuf> {
        let bytes = self.api.download_report(self.kind).await?;
        let file_name = DownloadsFolder::report_file_name(self.kind, Utc::now());

        self.downloads.save(&file_name, &bytes).map_err(|e| {
            tracing::warn!(file = %file_name, "Failed to save report: {}", e);
            Error::Storage(FAILED_TO_CREATE_FILE.to_string())
        })
    }
}
