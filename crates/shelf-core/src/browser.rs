//! Browsing session
//!
//! `Browser` is the single owner of everything that changes while a user
//! browses: the current match set, the pagination cursor, the open detail
//! view, the theme and the reviews. Each public method is one user action;
//! front ends re-render from the accessors after calling it.
//!
//! ```text
//! let catalog = Catalog::bundled()?;
//! let mut browser = Browser::new(&catalog, Theme::Day);
//!
//! browser.submit_search(FilterCriteria::any().with_title("dune"));
//! browser.show_more();
//! let rows = browser.previews().items;
//! ```

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::detail::{self, BookDetail};
use crate::error::{CatalogError, CatalogResult, ReviewError};
use crate::filter::{self, FilterCriteria, MatchSet};
use crate::models::Book;
use crate::pagination::Cursor;
use crate::preview::{self, PreviewPage};
use crate::reviews::{Rating, Review, ReviewBoard};
use crate::theme::{ColorTokens, Theme, ThemeController};

/// How the current match set was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Search form: title, author and genre
    Criteria(FilterCriteria),
    /// Free-text search over title or author
    Quick(String),
}

/// Interactive browsing state over a borrowed catalog
pub struct Browser<'c> {
    catalog: &'c Catalog,
    search: SearchMode,
    matches: MatchSet<'c>,
    cursor: Cursor,
    detail: Option<BookDetail<'c>>,
    theme: ThemeController,
    reviews: ReviewBoard,
}

impl<'c> Browser<'c> {
    /// Start a session showing the whole catalog
    pub fn new(catalog: &'c Catalog, theme: Theme) -> Self {
        let matches = MatchSet::all(catalog.books());
        let cursor = Cursor::reset(catalog.page_size(), matches.len());
        Self {
            catalog,
            search: SearchMode::Criteria(FilterCriteria::any()),
            matches,
            cursor,
            detail: None,
            theme: ThemeController::with_theme(theme),
            reviews: ReviewBoard::new(),
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    // ==================== Search ====================

    /// Run the search form; replaces the match set and resets pagination
    pub fn submit_search(&mut self, criteria: FilterCriteria) {
        let matches = filter::filter(self.catalog.books(), &criteria);
        self.search = SearchMode::Criteria(criteria);
        self.replace_matches(matches);
    }

    /// Run a free-text search; replaces the match set and resets pagination
    pub fn quick_search(&mut self, query: &str) {
        let matches = filter::quick_search(self.catalog, query);
        self.search = SearchMode::Quick(query.to_string());
        self.replace_matches(matches);
    }

    fn replace_matches(&mut self, matches: MatchSet<'c>) {
        self.cursor = Cursor::reset(self.catalog.page_size(), matches.len());
        self.matches = matches;
        debug!(
            "Match set replaced: {} books, {} revealed",
            self.matches.len(),
            self.cursor.revealed()
        );
    }

    /// The search that produced the current match set
    pub fn search(&self) -> &SearchMode {
        &self.search
    }

    pub fn matches(&self) -> &MatchSet<'c> {
        &self.matches
    }

    /// True when the last search found nothing
    pub fn is_empty_result(&self) -> bool {
        self.matches.is_empty()
    }

    // ==================== Pagination ====================

    /// Reveal the next page of matches
    pub fn show_more(&mut self) {
        self.cursor.advance();
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Matches not yet revealed
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Preview rows for every revealed match
    ///
    /// Row `i` of `items` is what the list shows at position `i`; books
    /// that cannot be projected are reported in `skipped` instead.
    pub fn previews(&self) -> PreviewPage {
        preview::project(self.catalog, &self.matches, &self.cursor)
    }

    // ==================== Detail ====================

    /// Open the detail view for a book
    ///
    /// On failure the previously open detail (if any) stays open.
    pub fn select(&mut self, id: &str) -> CatalogResult<&BookDetail<'c>> {
        match detail::resolve(self.catalog, id) {
            Ok(resolved) => Ok(&*self.detail.insert(resolved)),
            Err(e) => {
                if let CatalogError::DataIntegrity { .. } = e {
                    warn!("{}", e);
                }
                Err(e)
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&BookDetail<'c>> {
        self.detail.as_ref()
    }

    // ==================== Theme ====================

    pub fn apply_theme(&mut self, theme: Theme) -> ColorTokens {
        self.theme.apply(theme)
    }

    pub fn toggle_theme(&mut self) -> ColorTokens {
        self.theme.toggle()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn tokens(&self) -> ColorTokens {
        self.theme.tokens()
    }

    // ==================== Reviews ====================

    /// Review the book in the open detail view
    pub fn review_open_book(
        &mut self,
        reviewer: &str,
        rating: Rating,
        body: &str,
    ) -> Result<&Review, ReviewError> {
        let book: &'c Book = match &self.detail {
            Some(detail) => detail.book,
            None => return Err(ReviewError::NoBookSelected),
        };
        self.reviews
            .submit(self.catalog, &book.id, reviewer, rating, body)
    }

    /// Review any book by id
    pub fn submit_review(
        &mut self,
        book_id: &str,
        reviewer: &str,
        rating: Rating,
        body: &str,
    ) -> Result<&Review, ReviewError> {
        self.reviews
            .submit(self.catalog, book_id, reviewer, rating, body)
    }

    pub fn reviews(&self) -> &ReviewBoard {
        &self.reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use crate::models::{Author, Genre};
    use std::num::NonZeroUsize;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Book::new("b1", "Dune", "herbert").with_genre("sf"),
                Book::new("b2", "Foundation", "asimov").with_genre("sf"),
                Book::new("b3", "Neuromancer", "gibson").with_genre("cyberpunk"),
            ],
            vec![
                Author::new("herbert", "Frank Herbert"),
                Author::new("asimov", "Isaac Asimov"),
                Author::new("gibson", "William Gibson"),
            ],
            vec![
                Genre::new("sf", "Science Fiction"),
                Genre::new("cyberpunk", "Cyberpunk"),
            ],
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_with_whole_catalog() {
        let catalog = catalog();
        let browser = Browser::new(&catalog, Theme::Day);
        assert_eq!(browser.matches().len(), 3);
        assert_eq!(browser.cursor().revealed(), 2);
        assert_eq!(browser.remaining(), 1);
        assert!(browser.detail().is_none());
    }

    #[test]
    fn test_new_search_resets_pagination() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        browser.show_more();
        assert_eq!(browser.cursor().revealed(), 3);

        browser.submit_search(FilterCriteria::any().with_genre(Selection::Id("sf".to_string())));
        assert_eq!(browser.matches().len(), 2);
        assert_eq!(browser.cursor().revealed(), 2);
        assert_eq!(browser.remaining(), 0);
    }

    #[test]
    fn test_empty_result_state() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        browser.submit_search(FilterCriteria::any().with_title("tolkien"));
        assert!(browser.is_empty_result());
        assert!(browser.previews().items.is_empty());
        assert_eq!(browser.remaining(), 0);
    }

    #[test]
    fn test_quick_search_records_mode() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        browser.quick_search("gibson");
        assert_eq!(browser.search(), &SearchMode::Quick("gibson".to_string()));
        let rows = browser.previews().items;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "b3");
    }

    #[test]
    fn test_previews_only_cover_revealed_rows() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        assert_eq!(browser.previews().items.len(), 2);
        browser.show_more();
        let rows = browser.previews().items;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].id, "b3");
    }

    #[test]
    fn test_previews_keep_healthy_rows_next_to_dangling_book() {
        let catalog = Catalog::new(
            vec![
                Book::new("b1", "Dune", "herbert"),
                Book::new("b2", "Ghost Story", "nobody"),
            ],
            vec![Author::new("herbert", "Frank Herbert")],
            Vec::new(),
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap();
        let browser = Browser::new(&catalog, Theme::Day);

        let page = browser.previews();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "b1");
        assert_eq!(page.items[0].author_name, "Frank Herbert");
        assert_eq!(page.skipped.len(), 1);
        assert!(!browser.is_empty_result());
    }

    #[test]
    fn test_select_not_found_keeps_prior_detail() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        browser.select("b2").unwrap();

        let result = browser.select("nonexistent-id");
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
        assert_eq!(browser.detail().unwrap().id(), "b2");

        browser.close_detail();
        assert!(browser.detail().is_none());
    }

    #[test]
    fn test_theme_actions() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Night);
        assert_eq!(browser.theme(), Theme::Night);
        browser.toggle_theme();
        assert_eq!(browser.theme(), Theme::Day);
        assert_eq!(browser.apply_theme(Theme::Night), Theme::Night.tokens());
    }

    #[test]
    fn test_review_open_book() {
        let catalog = catalog();
        let mut browser = Browser::new(&catalog, Theme::Day);
        let rating = Rating::new(4).unwrap();

        assert_eq!(
            browser.review_open_book("me", rating, "nice").unwrap_err(),
            ReviewError::NoBookSelected
        );

        browser.select("b1").unwrap();
        browser.review_open_book("me", rating, "nice").unwrap();
        assert_eq!(browser.reviews().average("b1"), Some(4.0));
    }
}
