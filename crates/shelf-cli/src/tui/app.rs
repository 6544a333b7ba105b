//! Application state and logic

use anyhow::bail;
use shelf_core::{
    Book, BookDetail, Browser, Catalog, CatalogError, FilterCriteria, PreviewItem, Rating,
    Selection, Theme,
};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Search form (after pressing s)
    SearchForm,
    /// Live quick search (after pressing /)
    QuickSearch,
    /// Review input for the open book (after pressing r)
    Review,
}

/// Which field of the search form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Genre,
}

impl FormField {
    /// Move to the next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Genre,
            FormField::Genre => FormField::Title,
        }
    }

    /// Move to the previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Genre,
            FormField::Author => FormField::Title,
            FormField::Genre => FormField::Author,
        }
    }
}

/// A dropdown-style selector: index 0 is "any", the rest map to ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// (id, display name) pairs in display order
    pub options: Vec<(String, String)>,
    /// 0 for "any", otherwise options[index - 1]
    pub index: usize,
}

impl Choice {
    fn new(options: Vec<(String, String)>) -> Self {
        Self { options, index: 0 }
    }

    /// Step through the options, wrapping past "any"
    pub fn cycle(&mut self, forward: bool) {
        let len = self.options.len() + 1;
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }

    pub fn label(&self) -> &str {
        match self.index {
            0 => "Any",
            i => self.options.get(i - 1).map(|(_, name)| name.as_str()).unwrap_or("Any"),
        }
    }

    pub fn selection(&self) -> Selection {
        match self.index {
            0 => Selection::Any,
            i => self
                .options
                .get(i - 1)
                .map(|(id, _)| Selection::Id(id.clone()))
                .unwrap_or_default(),
        }
    }
}

/// Search form state
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub title: String,
    pub author: Choice,
    pub genre: Choice,
    pub field: FormField,
}

impl SearchForm {
    fn new(catalog: &Catalog) -> Self {
        Self {
            title: String::new(),
            author: Choice::new(
                catalog
                    .authors()
                    .iter()
                    .map(|a| (a.id.clone(), a.name.clone()))
                    .collect(),
            ),
            genre: Choice::new(
                catalog
                    .genres()
                    .iter()
                    .map(|g| (g.id.clone(), g.name.clone()))
                    .collect(),
            ),
            field: FormField::Title,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::any()
            .with_title(self.title.clone())
            .with_author(self.author.selection())
            .with_genre(self.genre.selection())
    }
}

/// Application state
pub struct App<'c> {
    /// Browsing session over the catalog
    pub browser: Browser<'c>,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text buffer for quick search and review input
    pub input: String,
    /// Search form state (kept between openings)
    pub form: SearchForm,
    /// Revealed previews, in list order
    pub rows: Vec<PreviewItem>,
    /// Currently selected row
    pub selected: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<std::time::Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<std::time::Instant>,
}

impl<'c> App<'c> {
    /// Create a new app browsing the whole catalog
    pub fn new(catalog: &'c Catalog, theme: Theme) -> Self {
        let mut app = Self {
            browser: Browser::new(catalog, theme),
            should_quit: false,
            input_mode: InputMode::Normal,
            input: String::new(),
            form: SearchForm::new(catalog),
            rows: Vec::new(),
            selected: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            pending_g: None,
        };
        app.refresh_rows();
        app
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(std::time::Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > std::time::Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Re-project the revealed matches into list rows
    ///
    /// Books that cannot be shown are left out and reported in the status bar.
    fn refresh_rows(&mut self) {
        let page = self.browser.previews();
        self.rows = page.items;
        if let Some(first) = page.skipped.first() {
            self.set_status(format!(
                "{} book(s) hidden: {} (run `shelf check` for details)",
                page.skipped.len(),
                first
            ));
        }
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    // ==================== Navigation ====================

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Book id behind the selected row
    pub fn selected_id(&self) -> Option<&'c str> {
        let row = self.rows.get(self.selected)?;
        self.browser
            .catalog()
            .book(&row.id)
            .map(|book| book.id.as_str())
    }

    /// Reveal the next page of results
    pub fn show_more(&mut self) {
        if self.browser.remaining() == 0 {
            self.set_status("No more books to show");
            return;
        }
        self.browser.show_more();
        self.refresh_rows();
    }

    // ==================== Detail ====================

    /// Open the detail view for the selected row
    pub fn open_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        // The prior detail stays open when resolution fails
        if let Err(e) = self.browser.select(id).map(|_| ()) {
            let message = match &e {
                CatalogError::DataIntegrity { .. } => {
                    format!("{} (run `shelf check` for details)", e)
                }
                _ => e.to_string(),
            };
            self.set_status(message);
        }
    }

    pub fn close_detail(&mut self) {
        self.browser.close_detail();
    }

    pub fn detail(&self) -> Option<&BookDetail<'c>> {
        self.browser.detail()
    }

    /// Book whose cover `o` opens: the open detail, else the selected row
    pub fn focused_book(&self) -> Option<&'c Book> {
        match self.browser.detail() {
            Some(detail) => Some(detail.book),
            None => self
                .selected_id()
                .and_then(|id| self.browser.catalog().book(id)),
        }
    }

    // ==================== Search ====================

    /// Open the search form
    pub fn enter_search_form(&mut self) {
        self.input_mode = InputMode::SearchForm;
        self.form.field = FormField::Title;
    }

    /// Run the search form and return to normal mode
    pub fn submit_form(&mut self) {
        self.browser.submit_search(self.form.criteria());
        self.after_search();
        self.input_mode = InputMode::Normal;
    }

    /// Cycle the focused selector, or do nothing on the title field
    pub fn cycle_form_choice(&mut self, forward: bool) {
        match self.form.field {
            FormField::Title => {}
            FormField::Author => self.form.author.cycle(forward),
            FormField::Genre => self.form.genre.cycle(forward),
        }
    }

    /// Start a live quick search
    pub fn enter_quick_search(&mut self) {
        self.input_mode = InputMode::QuickSearch;
        self.input.clear();
    }

    /// Leave quick search, going back to the form's criteria
    pub fn cancel_quick_search(&mut self) {
        self.exit_input_mode();
        self.browser.submit_search(self.form.criteria());
        self.after_search();
    }

    fn after_search(&mut self) {
        self.selected = 0;
        self.refresh_rows();
        if self.browser.is_empty_result() {
            self.set_status("No results found. Your filters might be too narrow.");
        }
    }

    // ==================== Text input ====================

    /// Insert character into the active text field
    pub fn insert_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::SearchForm => {
                if self.form.field == FormField::Title {
                    self.form.title.push(c);
                }
            }
            InputMode::QuickSearch => {
                self.input.push(c);
                self.apply_quick_search();
            }
            InputMode::Review => self.input.push(c),
            InputMode::Normal => {}
        }
    }

    /// Delete the last character of the active text field
    pub fn delete_char(&mut self) {
        match self.input_mode {
            InputMode::SearchForm => {
                if self.form.field == FormField::Title {
                    self.form.title.pop();
                }
            }
            InputMode::QuickSearch => {
                self.input.pop();
                self.apply_quick_search();
            }
            InputMode::Review => {
                self.input.pop();
            }
            InputMode::Normal => {}
        }
    }

    fn apply_quick_search(&mut self) {
        let query = self.input.clone();
        self.browser.quick_search(&query);
        self.selected = 0;
        self.refresh_rows();
    }

    /// Exit any input mode
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    // ==================== Theme & reviews ====================

    pub fn toggle_theme(&mut self) {
        self.browser.toggle_theme();
        self.set_status(format!("Theme: {}", self.browser.theme()));
    }

    /// Start typing a review for the open book
    pub fn enter_review_mode(&mut self) {
        if self.browser.detail().is_none() {
            self.set_status("Open a book (Enter) before reviewing it");
            return;
        }
        self.input_mode = InputMode::Review;
        self.input.clear();
    }

    /// Submit the typed review against the open book
    pub fn submit_review(&mut self) {
        let outcome = parse_review(&self.input).and_then(|(rating, body)| {
            self.browser
                .review_open_book("", rating, body)
                .map(|review| review.rating)
                .map_err(anyhow::Error::from)
        });
        match outcome {
            Ok(rating) => self.set_status(format!("Review saved ({})", rating.stars())),
            Err(e) => self.set_status(format!("Review not saved: {}", e)),
        }
        self.exit_input_mode();
    }
}

/// Parse `<rating> <text>` from the review prompt
pub fn parse_review(input: &str) -> anyhow::Result<(Rating, &str)> {
    let input = input.trim();
    let (rating, body) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let Ok(value) = rating.parse::<u8>() else {
        bail!("usage: <rating 1-5> <review text>");
    };
    Ok((Rating::new(value)?, body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{Author, Genre};
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
            vec![Genre::new("sf", "Science Fiction"), Genre::new("cyberpunk", "Cyberpunk")],
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Title.next(), FormField::Author);
        assert_eq!(FormField::Genre.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Genre);
    }

    #[test]
    fn test_choice_wraps_through_any() {
        let mut choice = Choice::new(vec![
            ("a".to_string(), "Alpha".to_string()),
            ("b".to_string(), "Beta".to_string()),
        ]);
        assert_eq!(choice.selection(), Selection::Any);

        choice.cycle(true);
        assert_eq!(choice.label(), "Alpha");
        assert_eq!(choice.selection(), Selection::Id("a".to_string()));

        choice.cycle(true);
        choice.cycle(true);
        assert_eq!(choice.label(), "Any");

        choice.cycle(false);
        assert_eq!(choice.label(), "Beta");
    }

    #[test]
    fn test_new_app_reveals_first_page() {
        let catalog = catalog();
        let app = App::new(&catalog, Theme::Day);
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.selected_id(), Some("b1"));
    }

    #[test]
    fn test_dangling_book_is_hidden_not_the_whole_list() {
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
        let mut app = App::new(&catalog, Theme::Day);

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].id, "b1");
        assert_eq!(app.selected_id(), Some("b1"));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("1 book(s) hidden") && m.contains("nobody")));

        // Rows and selection stay aligned at the end of the list
        app.move_down();
        assert_eq!(app.selected, 0);
        app.open_selected();
        assert_eq!(app.detail().map(|d| d.book.id.as_str()), Some("b1"));
    }

    #[test]
    fn test_no_selection_without_rows() {
        let catalog = Catalog::new(
            vec![Book::new("b1", "Ghost Story", "nobody")],
            Vec::new(),
            Vec::new(),
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap();
        let mut app = App::new(&catalog, Theme::Day);

        assert!(app.rows.is_empty());
        assert_eq!(app.selected_id(), None);
        app.open_selected();
        assert!(app.detail().is_none());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.move_up();
        assert_eq!(app.selected, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.selected, 1);

        app.show_more();
        app.move_to_last();
        assert_eq!(app.selected_id(), Some("b3"));
        app.move_to_first();
        assert_eq!(app.selected_id(), Some("b1"));
    }

    #[test]
    fn test_show_more_when_exhausted_sets_status() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);
        app.show_more();
        assert_eq!(app.rows.len(), 3);
        app.show_more();
        assert_eq!(app.rows.len(), 3);
        assert_eq!(app.status_message.as_deref(), Some("No more books to show"));
    }

    #[test]
    fn test_search_form_submit() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.enter_search_form();
        app.form.field = FormField::Genre;
        // genres are sorted by name: Cyberpunk, Science Fiction
        app.cycle_form_choice(true);
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].title, "Neuromancer");
    }

    #[test]
    fn test_search_form_empty_result() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.enter_search_form();
        for c in "zzz".chars() {
            app.insert_char(c);
        }
        app.submit_form();

        assert!(app.rows.is_empty());
        assert!(app.selected_id().is_none());
        assert!(app.status_message.as_deref().unwrap().starts_with("No results"));
    }

    #[test]
    fn test_quick_search_is_live_and_cancellable() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.enter_quick_search();
        for c in "gibson".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].title, "Neuromancer");

        app.cancel_quick_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.rows.len(), 2);
    }

    #[test]
    fn test_open_and_close_detail() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.move_down();
        app.open_selected();
        assert_eq!(app.detail().unwrap().book.title, "Foundation");
        assert_eq!(app.focused_book().unwrap().id, "b2");

        app.close_detail();
        assert!(app.detail().is_none());
    }

    #[test]
    fn test_review_requires_open_book() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);

        app.enter_review_mode();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.open_selected();
        app.enter_review_mode();
        assert_eq!(app.input_mode, InputMode::Review);
        for c in "5 A classic".chars() {
            app.insert_char(c);
        }
        app.submit_review();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.browser.reviews().reviews("b1").len(), 1);
        assert_eq!(app.browser.reviews().average("b1"), Some(5.0));
    }

    #[test]
    fn test_parse_review() {
        let (rating, body) = parse_review("4 Great read").unwrap();
        assert_eq!(rating.get(), 4);
        assert_eq!(body, "Great read");

        assert!(parse_review("9 too generous").is_err());
        assert!(parse_review("great").is_err());
        assert_eq!(parse_review("3").unwrap().1, "");
    }

    #[test]
    fn test_toggle_theme_sets_status() {
        let catalog = catalog();
        let mut app = App::new(&catalog, Theme::Day);
        app.toggle_theme();
        assert_eq!(app.browser.theme(), Theme::Night);
        assert_eq!(app.status_message.as_deref(), Some("Theme: night"));
    }
}
