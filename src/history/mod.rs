//! Watch-history persistence.
//!
//! A [`DocumentStore`] is the boundary to the remote document database: it can
//! add a document to a collection and list every document in it. The
//! [`HistoryClient`] sits on top and speaks in watch segments. Store failures
//! are logged at this boundary and handed back to the caller as
//! [`Error::Storage`]; nothing is retried.

pub mod autosave;
mod http;
mod memory;

pub use autosave::{Autosave, AutosaveWorker};
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use std::sync::Arc;
use watchtrail_common::{DocumentId, Error, Result, WatchDocument, WatchSegment};

use crate::config::StoreConfig;

/// Errors raised by document store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed store response: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Remote document database addressed by collection name.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a new document and return the identifier the store assigned.
    async fn add_document(
        &self,
        collection: &str,
        document: &WatchDocument,
    ) -> std::result::Result<DocumentId, StoreError>;

    /// List every document in the collection.
    async fn list_documents(
        &self,
        collection: &str,
    ) -> std::result::Result<Vec<WatchDocument>, StoreError>;
}

/// Create the HTTP-backed store described by the config
pub fn create_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    Arc::new(HttpDocumentStore::new(config))
}

/// Saves and loads watch segments through a [`DocumentStore`].
#[derive(Clone)]
pub struct HistoryClient {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl HistoryClient {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(create_store(config), config.collection.clone())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persist the segments as one new document.
    pub async fn save_segments(&self, segments: &[WatchSegment]) -> Result<DocumentId> {
        let document = WatchDocument::new(segments.to_vec());

        match self.store.add_document(&self.collection, &document).await {
            Ok(id) => {
                tracing::info!(
                    "Saved {} watch segments to {} as {}",
                    segments.len(),
                    self.collection,
                    id
                );
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Error saving watch segments: {}", e);
                Err(Error::storage(e.to_string()))
            }
        }
    }

    /// Load every saved document and flatten their segments.
    ///
    /// Segment order inside a document is preserved; document order is
    /// whatever the store returns.
    pub async fn get_history(&self) -> Result<Vec<WatchSegment>> {
        match self.store.list_documents(&self.collection).await {
            Ok(documents) => {
                let count = documents.len();
                let segments: Vec<WatchSegment> = documents
                    .into_iter()
                    .flat_map(|doc| doc.segments)
                    .collect();
                tracing::info!(
                    "Loaded {} watch segments from {} documents",
                    segments.len(),
                    count
                );
                Ok(segments)
            }
            Err(e) => {
                tracing::error!("Error loading watch data: {}", e);
                Err(Error::storage(e.to_string()))
            }
        }
    }
}
