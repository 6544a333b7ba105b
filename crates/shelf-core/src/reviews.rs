//! Ratings and reviews
//!
//! Reviews live only as long as the browsing session that collected them.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ReviewError;

/// Name shown for reviews submitted without one
pub const ANONYMOUS: &str = "Anonymous";

/// A star rating from 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ReviewError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::RatingOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Filled and empty stars, e.g. `★★★☆☆`
    pub fn stars(self) -> String {
        let filled = self.0 as usize;
        let empty = (Self::MAX - self.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// A single review of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub reviewer: String,
    pub rating: Rating,
    pub body: String,
}

/// Reviews grouped by book id
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    by_book: HashMap<String, Vec<Review>>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a review for a book in `catalog`
    ///
    /// The body is trimmed and must not end up empty. A blank reviewer name
    /// is recorded as [`ANONYMOUS`].
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        book_id: &str,
        reviewer: &str,
        rating: Rating,
        body: &str,
    ) -> Result<&Review, ReviewError> {
        if catalog.book(book_id).is_none() {
            return Err(ReviewError::UnknownBook(book_id.to_string()));
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(ReviewError::EmptyReview);
        }

        let reviewer = match reviewer.trim() {
            "" => ANONYMOUS,
            name => name,
        };

        debug!("Review for {}: {} stars", book_id, rating.get());
        let reviews = self.by_book.entry(book_id.to_string()).or_default();
        reviews.push(Review {
            reviewer: reviewer.to_string(),
            rating,
            body: body.to_string(),
        });
        Ok(&reviews[reviews.len() - 1])
    }

    /// Reviews for a book, oldest first
    pub fn reviews(&self, book_id: &str) -> &[Review] {
        self.by_book.get(book_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mean rating for a book, or `None` when it has no reviews
    pub fn average(&self, book_id: &str) -> Option<f32> {
        let reviews = self.reviews(book_id);
        if reviews.is_empty() {
            return None;
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating.get())).sum();
        Some(sum as f32 / reviews.len() as f32)
    }

    /// Total number of reviews across all books
    pub fn len(&self) -> usize {
        self.by_book.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Book};
    use std::num::NonZeroUsize;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Book::new("b1", "Dune", "a1"), Book::new("b2", "Emma", "a1")],
            vec![Author::new("a1", "Someone")],
            Vec::new(),
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap()
    }

    fn rating(n: u8) -> Rating {
        Rating::new(n).unwrap()
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::new(5).unwrap().get(), 5);
        assert_eq!(Rating::new(9), Err(ReviewError::RatingOutOfRange(9)));
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating(3).stars(), "★★★☆☆");
        assert_eq!(rating(5).stars(), "★★★★★");
    }

    #[test]
    fn test_submit_and_average() {
        let catalog = catalog();
        let mut board = ReviewBoard::new();
        board.submit(&catalog, "b1", "User 1", rating(5), "Great book!").unwrap();
        board.submit(&catalog, "b1", "User 2", rating(4), "Highly recommended!").unwrap();

        assert_eq!(board.reviews("b1").len(), 2);
        assert_eq!(board.reviews("b1")[0].reviewer, "User 1");
        assert_eq!(board.average("b1"), Some(4.5));
        assert_eq!(board.average("b2"), None);
        assert!(board.reviews("b2").is_empty());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_submit_trims_and_defaults_reviewer() {
        let catalog = catalog();
        let mut board = ReviewBoard::new();
        let review = board.submit(&catalog, "b2", "  ", rating(2), "  meh \n").unwrap();
        assert_eq!(review.reviewer, ANONYMOUS);
        assert_eq!(review.body, "meh");
    }

    #[test]
    fn test_submit_rejects_empty_body() {
        let catalog = catalog();
        let mut board = ReviewBoard::new();
        let result = board.submit(&catalog, "b1", "User", rating(3), "   ");
        assert_eq!(result.unwrap_err(), ReviewError::EmptyReview);
        assert!(board.is_empty());
    }

    #[test]
    fn test_submit_rejects_unknown_book() {
        let catalog = catalog();
        let mut board = ReviewBoard::new();
        let result = board.submit(&catalog, "nope", "User", rating(3), "text");
        assert_eq!(result.unwrap_err(), ReviewError::UnknownBook("nope".to_string()));
    }
}
