use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use watchtrail_common::{DocumentId, WatchDocument};

use super::{DocumentStore, StoreError};
use crate::config::StoreConfig;

/// Document store reached over its REST API.
///
/// - `POST {base}/v1/collections/{collection}/documents` with the document as
///   JSON, answered by `{"id": "..."}`
/// - `GET {base}/v1/collections/{collection}/documents`, answered by
///   `{"documents": [...]}`
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct AddDocumentResponse {
    id: DocumentId,
}

#[derive(Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<WatchDocument>,
}

impl HttpDocumentStore {
    pub fn new(config: &StoreConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/collections/{}/documents",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status { status, body })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        document: &WatchDocument,
    ) -> Result<DocumentId, StoreError> {
        let url = self.documents_url(collection);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(document).send().await?;
        let response = Self::check(response).await?;

        let body: AddDocumentResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(body.id)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<WatchDocument>, StoreError> {
        let url = self.documents_url(collection);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;

        let body: ListDocumentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(body.documents)
    }
}
