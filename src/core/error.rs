//! Error types for the catalog core.
//!
//! Every failure is local to the operation that produced it. A model that
//! simply does not exist is not an error: lookups return `Ok(None)` instead.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by the catalog clients, the filter engine and the trainer
/// repository.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Network, HTTP status or body decoding failure on a remote call.
    #[error("Remote fetch failed during {operation}: {message}")]
    RemoteFetch {
        /// Name of the client operation that failed (e.g. `fetch_all`).
        operation: &'static str,
        /// Transport or API error description.
        message: String,
    },

    /// A resource URL did not end in a numeric path segment.
    #[error("Malformed resource reference: {0}")]
    MalformedReference(String),

    /// A type-membership lookup failed while filtering.
    #[error("Filter query failed for type '{tag}': {source}")]
    FilterQuery {
        /// The type tag whose lookup failed.
        tag: String,
        /// Underlying lookup failure.
        #[source]
        source: Box<CatalogError>,
    },

    /// A record was missing required fields or failed validation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The generation key is not in the range table.
    #[error("Unknown generation: {0}")]
    UnknownGeneration(String),

    /// Client construction or configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Creates a remote fetch error for `operation`.
    #[must_use]
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            operation,
            message: message.into(),
        }
    }

    /// Wraps a lookup failure as a filter failure for `tag`.
    #[must_use]
    pub fn filter_query(tag: impl Into<String>, source: CatalogError) -> Self {
        Self::FilterQuery {
            tag: tag.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if the failure came from a remote service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        match self {
            Self::RemoteFetch { .. } => true,
            Self::FilterQuery { source, .. } => source.is_remote(),
            _ => false,
        }
    }

    /// Name of the failed client operation, if any.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::RemoteFetch { operation, .. } => Some(*operation),
            Self::FilterQuery { source, .. } => source.operation(),
            _ => None,
        }
    }
}
