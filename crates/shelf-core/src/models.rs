//! Data models for SHELF
//!
//! Defines the catalog records: Book, Author and Genre.
//! Records are loaded once and never mutated afterwards.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Id of the author in the catalog's author table
    #[serde(rename = "author")]
    pub author_id: String,
    /// Ids of the genres in the catalog's genre table
    #[serde(rename = "genres", default)]
    pub genre_ids: BTreeSet<String>,
    /// Cover image URI
    pub image: String,
    /// Blurb shown in the detail view
    #[serde(default)]
    pub description: String,
    /// Publication date
    pub published: DateTime<Utc>,
}

impl Book {
    /// Create a book with the given id, title and author
    ///
    /// The remaining fields start empty; the publication date defaults to the
    /// Unix epoch.
    pub fn new(id: impl Into<String>, title: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author_id: author_id.into(),
            genre_ids: BTreeSet::new(),
            image: String::new(),
            description: String::new(),
            published: DateTime::<Utc>::default(),
        }
    }

    /// Add a genre reference
    pub fn with_genre(mut self, genre_id: impl Into<String>) -> Self {
        self.genre_ids.insert(genre_id.into());
        self
    }

    /// Set the cover image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the publication date
    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = published;
        self
    }

    /// Year of publication
    pub fn published_year(&self) -> i32 {
        self.published.year()
    }

    /// Check whether the book carries the given genre
    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genre_ids.contains(genre_id)
    }
}

/// An author lookup entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
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

/// A genre lookup entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
