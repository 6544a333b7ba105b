//! Detail view resolution

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Book;

/// A fully resolved book, ready for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetail<'c> {
    pub book: &'c Book,
    pub author_name: &'c str,
    pub genre_names: Vec<&'c str>,
}

impl BookDetail<'_> {
    /// `"{author} ({year})"`, shown under the title
    pub fn subtitle(&self) -> String {
        format!("{} ({})", self.author_name, self.book.published_year())
    }

    pub fn id(&self) -> &str {
        &self.book.id
    }
}

/// Look up a book by id and resolve its references
pub fn resolve<'c>(catalog: &'c Catalog, id: &str) -> CatalogResult<BookDetail<'c>> {
    let book = catalog.book(id).ok_or_else(|| CatalogError::NotFound {
        id: id.to_string(),
    })?;

    Ok(BookDetail {
        book,
        author_name: catalog.author_name_of(book)?,
        genre_names: catalog.genre_names_of(book)?,
    })
}
