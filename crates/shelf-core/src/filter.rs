//! Search filtering
//!
//! Pure functions that turn search criteria into a [`MatchSet`]: the subset
//! of the catalog that matches, kept in catalog order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::Book;

/// Sentinel used by forms and the command line for "no restriction"
pub const ANY: &str = "any";

/// An author or genre restriction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Matches every record
    #[default]
    Any,
    /// Matches records referencing this id
    Id(String),
}

impl Selection {
    /// Build a selection from a form value, where `"any"` means unrestricted
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ANY {
            Selection::Any
        } else {
            Selection::Id(value.to_string())
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }

    /// The selected id, or `None` for Any
    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Any => None,
            Selection::Id(id) => Some(id),
        }
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selection::from_value(s))
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Any => write!(f, "{}", ANY),
            Selection::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Criteria submitted from the search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive title substring; blank means no title restriction
    pub title_query: String,
    pub author: Selection,
    pub genre: Selection,
}

impl FilterCriteria {
    /// Criteria that match every book
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, query: impl Into<String>) -> Self {
        self.title_query = query.into();
        self
    }

    pub fn with_author(mut self, author: Selection) -> Self {
        self.author = author;
        self
    }

    pub fn with_genre(mut self, genre: Selection) -> Self {
        self.genre = genre;
        self
    }

    /// Check a single book against the criteria
    ///
    /// A blank query places no restriction on the title. Otherwise the query
    /// is matched as typed, surrounding whitespace included.
    pub fn matches(&self, book: &Book) -> bool {
        let title_ok = self.title_query.trim().is_empty()
            || contains_ignore_case(&book.title, &self.title_query);
        let author_ok = match &self.author {
            Selection::Any => true,
            Selection::Id(id) => book.author_id == *id,
        };
        let genre_ok = match &self.genre {
            Selection::Any => true,
            Selection::Id(id) => book.has_genre(id),
        };

        title_ok && author_ok && genre_ok
    }
}

/// Ordered search result borrowing from the catalog
///
/// Always a subsequence of the catalog's books in catalog order.
/// A new search replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet<'c> {
    books: Vec<&'c Book>,
}

impl<'c> MatchSet<'c> {
    /// Every book in the catalog
    pub fn all(books: &'c [Book]) -> Self {
        Self {
            books: books.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[&'c Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &'c Book> + '_ {
        self.books.iter().copied()
    }

    /// The first `count` matches (clamped to the set size)
    pub fn prefix(&self, count: usize) -> &[&'c Book] {
        &self.books[..count.min(self.books.len())]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }
}

/// Filter books by title, author and genre, keeping their order
pub fn filter<'c>(books: &'c [Book], criteria: &FilterCriteria) -> MatchSet<'c> {
    let matches = MatchSet {
        books: books.iter().filter(|b| criteria.matches(b)).collect(),
    };
    debug!(
        "Filter title={:?} author={} genre={} matched {}/{}",
        criteria.title_query,
        criteria.author,
        criteria.genre,
        matches.len(),
        books.len()
    );
    matches
}

/// Free-text search over title or author name
///
/// The query is matched as typed. A book whose author is missing from the
/// catalog can still match by title.
pub fn quick_search<'c>(catalog: &'c Catalog, query: &str) -> MatchSet<'c> {
    if query.is_empty() {
        return MatchSet::all(catalog.books());
    }

    let matches = MatchSet {
        books: catalog
            .books()
            .iter()
            .filter(|book| {
                contains_ignore_case(&book.title, query)
                    || catalog
                        .author(&book.author_id)
                        .is_some_and(|a| contains_ignore_case(&a.name, query))
            })
            .collect(),
    };
    debug!("Quick search {:?} matched {}", query, matches.len());
    matches
}

/// Case-insensitive substring test using Unicode lowercasing
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
