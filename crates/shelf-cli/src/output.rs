//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;
use shelf_core::{Author, BookDetail, CatalogError, ColorTokens, Genre, PreviewItem, Theme};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// One page of search results as reported by `list` and `search`
#[derive(Debug, Serialize)]
pub struct ResultPage<'a> {
    pub items: &'a [PreviewItem],
    pub total: usize,
    pub remaining: usize,
    /// Revealed books left out because of broken references
    pub skipped: Vec<String>,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print revealed previews with the "show more" count
    pub fn print_previews(&self, page: &ResultPage<'_>) {
        match self.format {
            OutputFormat::Human => {
                if page.items.is_empty() && page.skipped.is_empty() {
                    println!("No results found. Your filters might be too narrow.");
                    return;
                }
                for item in page.items {
                    println!(
                        "{} | {} | {}",
                        pad(&item.id, 16),
                        truncate(&item.title, 35),
                        truncate(&item.author_name, 25)
                    );
                }
                println!();
                if page.remaining > 0 {
                    println!(
                        "Showing {} of {} book(s). {} more (use --pages to show more)",
                        page.items.len(),
                        page.total,
                        page.remaining
                    );
                } else {
                    println!("{} book(s)", page.total);
                }
                if !page.skipped.is_empty() {
                    println!();
                    for message in &page.skipped {
                        println!("✗ {}", message);
                    }
                    println!(
                        "{} book(s) hidden (run `shelf check` for details)",
                        page.skipped.len()
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", to_json(page));
            }
            OutputFormat::Quiet => {
                for item in page.items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print the detail view for a book
    pub fn print_detail(&self, detail: &BookDetail<'_>) {
        match self.format {
            OutputFormat::Human => {
                let book = detail.book;
                println!("{}", book.title);
                println!("{}", detail.subtitle());
                println!();
                println!("ID:        {}", book.id);
                if !detail.genre_names.is_empty() {
                    println!("Genres:    {}", detail.genre_names.join(", "));
                }
                println!("Published: {}", book.published.format("%Y-%m-%d"));
                println!("Cover:     {}", book.image);
                if !book.description.is_empty() {
                    println!();
                    println!("{}", book.description);
                }
            }
            OutputFormat::Json => {
                println!("{}", to_json(&detail_json(detail)));
            }
            OutputFormat::Quiet => {
                println!("{}", detail.book.id);
            }
        }
    }

    /// Print the author table
    pub fn print_authors(&self, authors: &[Author]) {
        self.print_lookup(
            "author",
            authors.iter().map(|a| (a.id.as_str(), a.name.as_str())),
        );
    }

    /// Print the genre table
    pub fn print_genres(&self, genres: &[Genre]) {
        self.print_lookup(
            "genre",
            genres.iter().map(|g| (g.id.as_str(), g.name.as_str())),
        );
    }

    fn print_lookup<'a>(&self, noun: &str, entries: impl Iterator<Item = (&'a str, &'a str)>) {
        let entries: Vec<_> = entries.collect();
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No {}s found.", noun);
                    return;
                }
                for (id, name) in &entries {
                    println!("{} | {}", pad(id, 16), name);
                }
                println!("\n{} {}(s)", entries.len(), noun);
            }
            OutputFormat::Json => {
                let json: Vec<_> = entries
                    .iter()
                    .map(|(id, name)| serde_json::json!({"id": id, "name": name}))
                    .collect();
                println!("{}", to_json(&json));
            }
            OutputFormat::Quiet => {
                for (id, _) in &entries {
                    println!("{}", id);
                }
            }
        }
    }

    /// Print a theme and its color tokens
    pub fn print_theme(&self, theme: Theme, tokens: &ColorTokens) {
        match self.format {
            OutputFormat::Human => {
                println!("Theme: {}", theme);
                println!("  --color-dark:  {}", tokens.dark);
                println!("  --color-light: {}", tokens.light);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "theme": theme,
                        "color_dark": tokens.dark.to_string(),
                        "color_light": tokens.light.to_string(),
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", theme);
            }
        }
    }

    /// Print catalog integrity problems
    pub fn print_issues(&self, issues: &[CatalogError]) {
        match self.format {
            OutputFormat::Human => {
                if issues.is_empty() {
                    println!("✓ Catalog is consistent");
                    return;
                }
                for issue in issues {
                    println!("✗ {}", issue);
                }
                println!("\n{} issue(s)", issues.len());
                if let Some(hint) = issues.first().and_then(|e| e.recovery_suggestion()) {
                    println!("{}", hint);
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = issues.iter().map(|e| e.to_string()).collect();
                println!("{}", serde_json::json!({ "issues": json }));
            }
            OutputFormat::Quiet => {
                for issue in issues {
                    println!("{}", issue);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn detail_json(detail: &BookDetail<'_>) -> serde_json::Value {
    serde_json::json!({
        "book": detail.book,
        "author": detail.author_name,
        "genres": detail.genre_names,
        "subtitle": detail.subtitle(),
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pad or truncate to a fixed column width
fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}
