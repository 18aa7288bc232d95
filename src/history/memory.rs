use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use watchtrail_common::{DocumentId, WatchDocument};

use super::{DocumentStore, StoreError};

/// In-process document store keeping documents in insertion order.
///
/// Useful for read-only embeddings and tests; nothing survives the process.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<WatchDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        document: &WatchDocument,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        let stored = document.clone().with_id(id.clone());

        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(id)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<WatchDocument>, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }
}
