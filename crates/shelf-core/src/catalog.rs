//! Catalog store
//!
//! The `Catalog` owns every book record together with the author and genre
//! lookup tables and the page size used for pagination. It is built once at
//! startup and only read afterwards, so every other component borrows it.
//!
//! ## Catalog file
//!
//! ```text
//! {
//!   "books": [{ "id", "title", "author", "genres", "image", "description", "published" }],
//!   "authors": { "<id>": "<name>" },
//!   "genres": { "<id>": "<name>" },
//!   "books_per_page": 36
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult, Reference};
use crate::models::{Author, Book, Genre};

/// Page size used when a catalog file does not declare one
pub const DEFAULT_PAGE_SIZE: usize = 36;

/// Sample catalog compiled into the crate
const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    books: Vec<Book>,
    #[serde(default)]
    authors: BTreeMap<String, String>,
    #[serde(default)]
    genres: BTreeMap<String, String>,
    #[serde(default = "default_page_size")]
    books_per_page: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// In-memory, read-only book catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    /// Sorted by display name
    authors: Vec<Author>,
    /// Sorted by display name
    genres: Vec<Genre>,
    book_index: HashMap<String, usize>,
    author_index: HashMap<String, usize>,
    genre_index: HashMap<String, usize>,
    page_size: NonZeroUsize,
}

impl Catalog {
    /// Build a catalog from its parts
    ///
    /// Book order is kept as given; it is the order every search result
    /// follows. Duplicate book ids are rejected. Dangling author or genre
    /// references are allowed here and reported by [`Catalog::integrity_issues`].
    pub fn new(
        books: Vec<Book>,
        authors: Vec<Author>,
        genres: Vec<Genre>,
        page_size: NonZeroUsize,
    ) -> CatalogResult<Self> {
        let mut book_index = HashMap::with_capacity(books.len());
        for (pos, book) in books.iter().enumerate() {
            if book_index.insert(book.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateBook {
                    id: book.id.clone(),
                });
            }
        }

        let mut authors = authors;
        authors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let author_index = authors
            .iter()
            .enumerate()
            .map(|(pos, a)| (a.id.clone(), pos))
            .collect();

        let mut genres = genres;
        genres.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let genre_index = genres
            .iter()
            .enumerate()
            .map(|(pos, g)| (g.id.clone(), pos))
            .collect();

        Ok(Self {
            books,
            authors,
            genres,
            book_index,
            author_index,
            genre_index,
            page_size,
        })
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// The sample catalog shipped with the crate
    pub fn bundled() -> CatalogResult<Self> {
        Self::from_json(BUNDLED_CATALOG, Path::new("<bundled>"))
    }

    /// Parse a catalog from JSON text; `origin` is only used in errors and logs
    pub fn from_json(content: &str, origin: &Path) -> CatalogResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|source| CatalogError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        let page_size = NonZeroUsize::new(file.books_per_page)
            .ok_or(CatalogError::InvalidPageSize(file.books_per_page))?;

        let authors = file
            .authors
            .into_iter()
            .map(|(id, name)| Author::new(id, name))
            .collect();
        let genres = file
            .genres
            .into_iter()
            .map(|(id, name)| Genre::new(id, name))
            .collect();

        let catalog = Self::new(file.books, authors, genres, page_size)?;

        for issue in catalog.integrity_issues() {
            warn!("{}: {}", origin.display(), issue);
        }
        debug!(
            "Loaded catalog from {}: {} books, {} authors, {} genres",
            origin.display(),
            catalog.books.len(),
            catalog.authors.len(),
            catalog.genres.len()
        );

        Ok(catalog)
    }

    /// Replace the page size (e.g. from configuration)
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// All books in catalog order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All authors, ordered by name
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// All genres, ordered by name
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Number of books per revealed page
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get a book by id
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.book_index.get(id).map(|&pos| &self.books[pos])
    }

    /// Get an author by id
    pub fn author(&self, id: &str) -> Option<&Author> {
        self.author_index.get(id).map(|&pos| &self.authors[pos])
    }

    /// Get a genre by id
    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genre_index.get(id).map(|&pos| &self.genres[pos])
    }

    /// Resolve a book's author name, failing on a dangling reference
    pub fn author_name_of(&self, book: &Book) -> CatalogResult<&str> {
        self.author(&book.author_id)
            .map(|a| a.name.as_str())
            .ok_or_else(|| CatalogError::DataIntegrity {
                book_id: book.id.clone(),
                reference: Reference::Author,
                missing_id: book.author_id.clone(),
            })
    }

    /// Resolve a book's genre names (ordered by genre id), failing on a dangling reference
    pub fn genre_names_of(&self, book: &Book) -> CatalogResult<Vec<&str>> {
        book.genre_ids
            .iter()
            .map(|id| {
                self.genre(id)
                    .map(|g| g.name.as_str())
                    .ok_or_else(|| CatalogError::DataIntegrity {
                        book_id: book.id.clone(),
                        reference: Reference::Genre,
                        missing_id: id.clone(),
                    })
            })
            .collect()
    }

    /// Every dangling author or genre reference in the catalog
    pub fn integrity_issues(&self) -> Vec<CatalogError> {
        let mut issues = Vec::new();
        for book in &self.books {
            if let Err(e) = self.author_name_of(book) {
                issues.push(e);
            }
            for genre_id in &book.genre_ids {
                if self.genre(genre_id).is_none() {
                    issues.push(CatalogError::DataIntegrity {
                        book_id: book.id.clone(),
                        reference: Reference::Genre,
                        missing_id: genre_id.clone(),
                    });
                }
            }
        }
        issues
    }
}

/// Where a catalog was loaded from, for status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Bundled => write!(f, "(bundled sample)"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl CatalogSource {
    /// Load the catalog this source points at
    pub fn load(&self) -> CatalogResult<Catalog> {
        match self {
            CatalogSource::Bundled => Catalog::bundled(),
            CatalogSource::File(path) => Catalog::load(path),
        }
    }
}
