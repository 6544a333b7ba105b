//! Preview list projection

use serde::Serialize;
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::filter::MatchSet;
use crate::models::Book;
use crate::pagination::Cursor;

/// What the list shows for one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewItem {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub image: String,
}

/// Rows for the revealed matches, plus the books that could not be shown
#[derive(Debug, Default)]
pub struct PreviewPage {
    pub items: Vec<PreviewItem>,
    pub skipped: Vec<CatalogError>,
}

impl PreviewPage {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Project one book into a preview item
pub fn project_book(catalog: &Catalog, book: &Book) -> CatalogResult<PreviewItem> {
    Ok(PreviewItem {
        id: book.id.clone(),
        title: book.title.clone(),
        author_name: catalog.author_name_of(book)?.to_string(),
        image: book.image.clone(),
    })
}

/// Project the revealed prefix of a match set into preview items
///
/// Earlier pages stay in the result, so the list grows with each reveal.
/// A book pointing at an unknown author is left out of `items` and its
/// error is kept in `skipped`.
pub fn project(catalog: &Catalog, matches: &MatchSet<'_>, cursor: &Cursor) -> PreviewPage {
    let mut page = PreviewPage::default();
    for book in matches.prefix(cursor.revealed()) {
        match project_book(catalog, book) {
            Ok(item) => page.items.push(item),
            Err(e) => {
                warn!("Skipping preview: {}", e);
                page.skipped.push(e);
            }
        }
    }
    page
}
