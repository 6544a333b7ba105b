//! Catalog error handling
//!
//! Typed errors for loading the catalog and resolving records, with
//! descriptive messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which lookup table a dangling reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Author,
    Genre,
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Author => write!(f, "author"),
            Reference::Genre => write!(f, "genre"),
        }
    }
}

/// Errors that can occur while loading or querying the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A book references an author or genre that is not in the lookup tables
    #[error("Book '{book_id}' references unknown {reference} '{missing_id}'")]
    DataIntegrity {
        book_id: String,
        reference: Reference,
        missing_id: String,
    },

    /// No book with the requested id
    #[error("Book not found: '{id}'")]
    NotFound { id: String },

    /// Two books share an id
    #[error("Duplicate book id '{id}' in catalog")]
    DuplicateBook { id: String },

    /// The catalog declares a page size of zero
    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(usize),

    /// Failed to read the catalog file
    #[error("Failed to read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog file is not valid JSON or has the wrong shape
    #[error("Invalid catalog format in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Check if this error is recoverable
    ///
    /// A lookup miss leaves the caller's state intact; everything else means
    /// the catalog itself cannot be trusted.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            CatalogError::NotFound { .. } => {
                Some("List books with `shelf list` to see valid ids.")
            }
            CatalogError::DataIntegrity { .. } => {
                Some("Add the missing entry to the catalog's authors/genres table or fix the book's reference.")
            }
            CatalogError::DuplicateBook { .. } => Some("Give every book in the catalog a unique id."),
            CatalogError::InvalidPageSize(_) => Some("Set books_per_page to a positive number."),
            CatalogError::Read { .. } => {
                Some("Check that the catalog path exists and is readable, or unset catalog_path to use the bundled catalog.")
            }
            CatalogError::Parse { .. } => None,
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from submitting a review
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Rating {0} is out of range: must be between 1 and 5")]
    RatingOutOfRange(u8),

    #[error("Review text cannot be empty")]
    EmptyReview,

    #[error("Cannot review unknown book '{0}'")]
    UnknownBook(String),

    #[error("No book is open to review")]
    NoBookSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_recoverable() {
        let err = CatalogError::NotFound {
            id: "missing".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(err.recovery_suggestion().is_some());
        assert_eq!(err.to_string(), "Book not found: 'missing'");
    }

    #[test]
    fn test_data_integrity_display() {
        let err = CatalogError::DataIntegrity {
            book_id: "b1".to_string(),
            reference: Reference::Genre,
            missing_id: "sf".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("b1"));
        assert!(msg.contains("unknown genre 'sf'"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_read_error_display() {
        let err = CatalogError::Read {
            path: PathBuf::from("/missing/catalog.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/missing/catalog.json"));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_review_error_display() {
        assert_eq!(
            ReviewError::RatingOutOfRange(7).to_string(),
            "Rating 7 is out of range: must be between 1 and 5"
        );
    }
}
