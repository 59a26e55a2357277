use application::SearchRequest;
use chrono::{DateTime, Utc};
use domain::Document;
use std::collections::HashSet;
use tracing::trace;

/// A single filter dimension evaluated against a stored document.
pub type Predicate<'a> = Box<dyn Fn(&Document) -> bool + Send + Sync + 'a>;

/// Conjunction of the predicates derived from a [`SearchRequest`].
///
/// One predicate is added per populated request field; unset fields add
/// nothing, so an empty request matches every document.
pub struct DocumentFilter<'a> {
    predicates: Vec<Predicate<'a>>,
}

impl<'a> DocumentFilter<'a> {
    pub fn from_request(request: &'a SearchRequest) -> Self {
        let mut predicates: Vec<Predicate<'a>> = Vec::new();

        if let Some(prefixes) = &request.title_prefixes {
            predicates.push(Box::new(title_prefix(prefixes)));
        }
        if let Some(contents) = &request.contains_contents {
            predicates.push(Box::new(content_contains(contents)));
        }
        if let Some(ids) = &request.author_ids {
            predicates.push(Box::new(author_ids(ids)));
        }
        if let Some(from) = request.created_from {
            predicates.push(Box::new(created_after(from)));
        }
        if let Some(to) = request.created_to {
            predicates.push(Box::new(created_before(to)));
        }

        trace!(active = predicates.len(), "Built document filter");
        Self { predicates }
    }

    /// True when the document satisfies every active predicate.
    pub fn matches(&self, doc: &Document) -> bool {
        self.predicates.iter().all(|predicate| predicate(doc))
    }

    pub fn active_filters(&self) -> usize {
        self.predicates.len()
    }
}

/// Title starts with any of the prefixes.
pub fn title_prefix(prefixes: &[String]) -> impl Fn(&Document) -> bool + Send + Sync + '_ {
    move |doc| {
        prefixes
            .iter()
            .any(|prefix| doc.title().starts_with(prefix.as_str()))
    }
}

/// Content contains any of the strings as a literal substring.
pub fn content_contains(contents: &[String]) -> impl Fn(&Document) -> bool + Send + Sync + '_ {
    move |doc| {
        contents
            .iter()
            .any(|needle| doc.content().contains(needle.as_str()))
    }
}

/// Membership of the document's *own* id in `ids`.
///
/// The author field is deliberately not consulted: callers rely on this
/// filter keying on document ids.
pub fn author_ids(ids: &HashSet<String>) -> impl Fn(&Document) -> bool + Send + Sync + '_ {
    move |doc| doc.id().is_some_and(|id| ids.contains(id.as_str()))
}

/// `created` strictly after `from`.
pub fn created_after(from: DateTime<Utc>) -> impl Fn(&Document) -> bool + Send + Sync {
    move |doc| doc.created() > from
}

/// `created` strictly before `to`.
pub fn created_before(to: DateTime<Utc>) -> impl Fn(&Document) -> bool + Send + Sync {
    move |doc| doc.created() < to
}
