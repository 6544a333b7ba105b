//! "Show more" pagination
//!
//! Pagination is additive: each step reveals another page on top of what is
//! already visible, never more than the match set holds.

use std::num::NonZeroUsize;

use serde::Serialize;

/// How much of the current match set has been revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    page_size: NonZeroUsize,
    revealed: usize,
    total: usize,
}

impl Cursor {
    /// Start a cursor over a match set of `total` items, revealing the first page
    pub fn reset(page_size: NonZeroUsize, total: usize) -> Self {
        Self {
            page_size,
            revealed: page_size.get().min(total),
            total,
        }
    }

    /// Reveal the next page; a no-op once everything is revealed
    pub fn advance(&mut self) {
        self.revealed = self
            .revealed
            .saturating_add(self.page_size.get())
            .min(self.total);
    }

    /// Number of items currently revealed
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Number of items still hidden
    pub fn remaining(&self) -> usize {
        self.total - self.revealed
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Size of the match set this cursor walks
    pub fn total(&self) -> usize {
        self.total
    }
}
