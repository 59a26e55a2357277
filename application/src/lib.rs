use chrono::{DateTime, Utc};
use domain::{Document, DocumentId, DomainError};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// The caller broke the operation's contract (e.g. an empty identifier).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// Every domain validation failure is a caller contract violation.
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::InvalidArgument(err.to_string())
    }
}

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing and retrieving documents.
pub trait DocumentRepository: Send + Sync {
    /// Adds or replaces a document. The document must carry an id.
    fn save(&self, document: &Document) -> Result<(), ApplicationError>;
    /// Retrieves a document by its ID.
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns every stored document matching all populated fields of the request.
    fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError>;
    /// Number of stored documents.
    fn count(&self) -> Result<usize, ApplicationError>;
}

/// Source of identifiers for documents saved without one.
pub trait IdGenerator: Send + Sync {
    /// Produces a new, non-empty, collision-free identifier.
    fn generate(&self) -> DocumentId;
}

// --- Request Models ---

/// Describes a document search. Every unset field imposes no constraint.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// Title must start with one of these.
    pub title_prefixes: Option<Vec<String>>,
    /// Content must contain one of these as a literal substring.
    pub contains_contents: Option<Vec<String>>,
    /// Matched against the document's own id, not its author's id.
    pub author_ids: Option<HashSet<String>>,
    /// Exclusive lower bound on `created`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created`.
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_contains_contents<I, S>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_contents = Some(contents.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_author_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn with_created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// True when no field is set, i.e. the request matches every document.
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }
}

// --- Application Services (Use Cases) ---

/// The document store: upsert with id assignment, filtered search and lookup by id.
pub struct DocumentService {
    doc_repo: Arc<dyn DocumentRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentService {
    pub fn new(doc_repo: Arc<dyn DocumentRepository>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            doc_repo,
            id_generator,
        }
    }

    /// Upserts a document, generating an id when it has none.
    ///
    /// An existing record under the same id is replaced as a whole, `created`
    /// included. The returned value equals what [`find_by_id`](Self::find_by_id)
    /// yields afterwards.
    #[instrument(skip(self, document), fields(doc_id = ?document.id()))]
    pub fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        let document = self.prepare(document).inspect_err(|e| {
            warn!("Save rejected: {}", e);
        })?;

        self.doc_repo.save(&document).inspect_err(|e| {
            error!("Failed to save document to repository: {}", e);
        })?;
        info!(doc_id = ?document.id(), "Document saved");

        Ok(document)
    }

    /// Returns every document matching the request. Order is unspecified.
    #[instrument(skip(self, request))]
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let hits = self.doc_repo.search(request)?;
        info!(
            unconstrained = request.is_unconstrained(),
            total_hits = hits.len(),
            "Search finished"
        );
        Ok(hits)
    }

    /// Looks up a document by id. An empty id is a contract violation; an
    /// unknown one is simply absent.
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        let doc_id = DocumentId::parse(id).inspect_err(|_| {
            warn!("Lookup rejected: empty id");
        })?;
        let found = self.doc_repo.get(&doc_id)?;
        debug!(doc_id = %doc_id, found = found.is_some(), "Lookup finished");
        Ok(found)
    }

    pub fn document_count(&self) -> Result<usize, ApplicationError> {
        self.doc_repo.count()
    }

    fn prepare(&self, document: Document) -> Result<Document, ApplicationError> {
        document.validate()?;
        if document.id().is_some() {
            return Ok(document);
        }
        let id = self.id_generator.generate();
        debug!(doc_id = %id, "Generated id for new document");
        Ok(document.with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Map-backed repository; search ignores the request.
    #[derive(Default)]
    struct MapRepository {
        docs: Mutex<HashMap<DocumentId, Document>>,
    }

    impl DocumentRepository for MapRepository {
        fn save(&self, document: &Document) -> Result<(), ApplicationError> {
            let id = document
                .id()
                .cloned()
                .ok_or_else(|| ApplicationError::InvalidArgument("missing id".to_string()))?;
            self.docs.lock().unwrap().insert(id, document.clone());
            Ok(())
        }

        fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
            Ok(self.docs.lock().unwrap().get(id).cloned())
        }

        fn search(&self, _request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
            Ok(self.docs.lock().unwrap().values().cloned().collect())
        }

        fn count(&self) -> Result<usize, ApplicationError> {
            Ok(self.docs.lock().unwrap().len())
        }
    }

    #[derive(Default)]
    struct SequenceGenerator {
        next: AtomicUsize,
    }

    impl IdGenerator for SequenceGenerator {
        fn generate(&self) -> DocumentId {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            DocumentId::new(format!("gen-{}", n))
        }
    }

    fn service() -> (DocumentService, Arc<MapRepository>) {
        let repo = Arc::new(MapRepository::default());
        let service = DocumentService::new(repo.clone(), Arc::new(SequenceGenerator::default()));
        (service, repo)
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 5, 8, 30, 0).unwrap()
    }

    #[test]
    fn save_assigns_generated_id_and_keeps_created() {
        let (service, _) = service();
        let saved = service
            .save(Document::new("Title", "Body", created()))
            .unwrap();

        assert_eq!(saved.id().map(DocumentId::as_str), Some("gen-0"));
        assert_eq!(saved.created(), created());
    }

    #[test]
    fn save_keeps_explicit_id() {
        let (service, _) = service();
        let saved = service
            .save(Document::new("Title", "Body", created()).with_id("7"))
            .unwrap();

        assert_eq!(saved.id().map(DocumentId::as_str), Some("7"));
        assert_eq!(service.find_by_id("7").unwrap(), Some(saved));
    }

    #[test]
    fn save_rejects_empty_id_without_storing() {
        let (service, repo) = service();
        let result = service.save(Document::new("Title", "Body", created()).with_id(""));

        assert!(matches!(result, Err(ApplicationError::InvalidArgument(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn find_by_id_rejects_empty_id() {
        let (service, _) = service();
        assert!(matches!(
            service.find_by_id(""),
            Err(ApplicationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn whitespace_id_is_a_valid_key() {
        let (service, _) = service();
        let saved = service
            .save(Document::new("Title", "Body", created()).with_id(" "))
            .unwrap();

        assert_eq!(saved.id().map(DocumentId::as_str), Some(" "));
        assert_eq!(service.find_by_id(" ").unwrap(), Some(saved));
        assert!(service.find_by_id("\t").unwrap().is_none());
    }

    #[test]
    fn search_request_deserializes_with_missing_fields() {
        let request: SearchRequest = serde_json::from_value(json!({
            "titlePrefixes": ["My"],
            "createdTo": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(request.title_prefixes, Some(vec!["My".to_string()]));
        assert!(request.contains_contents.is_none());
        assert!(request.author_ids.is_none());
        assert!(request.created_from.is_none());
        assert_eq!(
            request.created_to,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn empty_request_is_unconstrained() {
        assert!(SearchRequest::new().is_unconstrained());
        assert!(!SearchRequest::new().with_author_ids(["1"]).is_unconstrained());
    }
}
