//! Book command handlers
//!
//! Each command runs one browsing session: search, reveal pages, print.

use anyhow::{bail, Result};

use shelf_core::{Browser, Catalog, CatalogError, FilterCriteria, Theme};

use crate::output::{Output, ResultPage};

/// Filter the catalog and print the first `pages` pages of results
pub fn list(catalog: &Catalog, criteria: FilterCriteria, pages: usize, output: &Output) -> Result<()> {
    let mut browser = Browser::new(catalog, Theme::default());
    browser.submit_search(criteria);
    print_pages(&mut browser, pages, output)
}

/// Search titles and author names and print the first `pages` pages
pub fn search(catalog: &Catalog, query: String, pages: usize, output: &Output) -> Result<()> {
    let mut browser = Browser::new(catalog, Theme::default());
    browser.quick_search(&query);
    print_pages(&mut browser, pages, output)
}

fn print_pages(browser: &mut Browser<'_>, pages: usize, output: &Output) -> Result<()> {
    for _ in 1..pages.max(1) {
        browser.show_more();
    }

    // Broken entries are reported alongside the rows, not in place of them
    let page = browser.previews();
    output.print_previews(&ResultPage {
        items: &page.items,
        total: browser.matches().len(),
        remaining: browser.remaining(),
        skipped: page.skipped.iter().map(|e| e.to_string()).collect(),
    });
    Ok(())
}

/// Show a single book
///
/// Reviews belong to a TUI session, so a one-shot `show` prints none.
pub fn show(catalog: &Catalog, id: String, output: &Output) -> Result<()> {
    let mut browser = Browser::new(catalog, Theme::default());

    match browser.select(&id) {
        Ok(_) => {}
        Err(e @ CatalogError::NotFound { .. }) => {
            let hint = e.recovery_suggestion().unwrap_or_default();
            bail!("{}. {}", e, hint);
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(detail) = browser.detail() {
        output.print_detail(detail);
    }
    Ok(())
}
