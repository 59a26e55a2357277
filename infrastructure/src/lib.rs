// Module declarations
pub mod config;
pub mod id_generator;
pub mod persistence;
pub mod search;

// Re-export all implementations
pub use config::{IdStrategy, StoreConfig};
pub use id_generator::UuidIdGenerator;
pub use persistence::InMemoryDocumentRepository;
pub use search::DocumentFilter;

use application::DocumentService;
use std::sync::Arc;
use tracing::info;

/// Wires the in-memory repository and the configured id generator into a
/// fresh, empty document store.
pub fn build_document_service(config: &StoreConfig) -> DocumentService {
    let document_repository = Arc::new(InMemoryDocumentRepository::new());
    let id_generator = Arc::new(UuidIdGenerator::new(config.id_strategy));
    info!(id_strategy = ?config.id_strategy, "In-memory document store initialized.");
    DocumentService::new(document_repository, id_generator)
}
