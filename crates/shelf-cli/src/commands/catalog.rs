//! Catalog inspection handlers

use anyhow::{bail, Result};

use shelf_core::Catalog;

use crate::output::Output;

/// List all authors
pub fn authors(catalog: &Catalog, output: &Output) -> Result<()> {
    output.print_authors(catalog.authors());
    Ok(())
}

/// List all genres
pub fn genres(catalog: &Catalog, output: &Output) -> Result<()> {
    output.print_genres(catalog.genres());
    Ok(())
}

/// Report dangling author/genre references; fails when any exist
pub fn check(catalog: &Catalog, output: &Output) -> Result<()> {
    let issues = catalog.integrity_issues();
    output.print_issues(&issues);
    if !issues.is_empty() {
        bail!("Catalog has {} integrity issue(s)", issues.len());
    }
    Ok(())
}
