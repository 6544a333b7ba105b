//! SHELF Core Library
//!
//! This crate provides the core functionality for SHELF, a book catalog
//! browser: searching and filtering a read-only catalog, revealing results
//! page by page, resolving book details, a day/night theme, and in-session
//! reviews.
//!
//! # Quick Start
//!
//! ```text
//! let catalog = Catalog::bundled()?;
//! let mut browser = Browser::new(&catalog, Theme::Day);
//!
//! browser.submit_search(FilterCriteria::any().with_title("dune"));
//! for item in browser.previews().items {
//!     println!("{} by {}", item.title, item.author_name);
//! }
//! ```
//!
//! # Modules
//!
//! - `browser`: Session state, one method per user action (main entry point)
//! - `catalog`: Read-only book store and lookup tables
//! - `filter`: Search criteria and match sets
//! - `pagination`: "Show more" cursor
//! - `preview`: List projection
//! - `detail`: Detail view resolution
//! - `theme`: Day/night theme and color tokens
//! - `reviews`: Ratings and reviews
//! - `config`: Application configuration

pub mod browser;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod preview;
pub mod reviews;
pub mod theme;

pub use browser::{Browser, SearchMode};
pub use catalog::{Catalog, CatalogSource, DEFAULT_PAGE_SIZE};
pub use config::Config;
pub use detail::BookDetail;
pub use error::{CatalogError, CatalogResult, Reference, ReviewError};
pub use filter::{FilterCriteria, MatchSet, Selection, ANY};
pub use models::{Author, Book, Genre};
pub use pagination::Cursor;
pub use preview::{PreviewItem, PreviewPage};
pub use reviews::{Rating, Review, ReviewBoard};
pub use theme::{ColorTokens, Rgb, Theme, ThemeController, ThemeParseError};
