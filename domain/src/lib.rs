use chrono::{DateTime, Utc}; // Creation timestamps
use serde::Deserialize;
use std::fmt;
use thiserror::Error; // For domain-specific errors

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Document id must not be empty")]
    EmptyId,
}

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an identifier without validation. Used by id generators, which
    /// never produce empty values.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Validates a caller-supplied identifier. Only the empty string is
    /// rejected; whitespace is a valid id.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

// --- Author ---

/// The author embedded in a document. Has no lifecycle of its own.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record. The id is optional until the document is saved; the
/// store assigns one when it is missing and never touches `created`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: Option<DocumentId>,
    title: String,
    content: String,
    author: Option<Author>,
    created: DateTime<Utc>,
}

impl Document {
    /// Creates a document without an id or author.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            author: None,
            created,
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Checks that an id, if present, is usable as a storage key.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.id {
            Some(id) if id.is_empty() => Err(DomainError::EmptyId),
            _ => Ok(()),
        }
    }
}
