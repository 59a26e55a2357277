// ./infrastructure/src/persistence/in_memory_repository.rs
use crate::search::DocumentFilter;
use application::{ApplicationError, DocumentRepository, SearchRequest};
use dashmap::DashMap;
use domain::{Document, DocumentId};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Volatile document storage. Each instance owns its own map; clones share it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    store: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    fn key_of(document: &Document) -> Result<DocumentId, ApplicationError> {
        match document.id() {
            Some(id) if !id.is_empty() => Ok(id.clone()),
            _ => {
                warn!("Refusing to store a document without an id");
                Err(ApplicationError::InvalidArgument(
                    "Document must carry a non-empty id to be stored".to_string(),
                ))
            }
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, document: &Document) -> Result<(), ApplicationError> {
        let id = Self::key_of(document)?;
        debug!(doc_id = %id, "Saving document to in-memory store");
        // Full replace; no field merge with a previous record
        self.store.insert(id, Arc::new(document.clone()));
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        let doc = self.store.get(id).map(|doc_ref| (**doc_ref).clone());
        Ok(doc)
    }

    #[instrument(skip(self, request))]
    fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let filter = DocumentFilter::from_request(request);
        let hits: Vec<Document> = self
            .store
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| (**entry.value()).clone())
            .collect();
        debug!(
            active_filters = filter.active_filters(),
            scanned = self.store.len(),
            total_hits = hits.len(),
            "In-memory search finished"
        );
        Ok(hits)
    }

    fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.store.len())
    }
}
