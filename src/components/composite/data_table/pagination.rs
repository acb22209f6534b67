//! Pagination State
//!
//! Page index / page size pair and its transitions. Every transition returns a
//! new state; the row count is supplied by the caller because it depends on
//! the filters active in the same state generation.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Zero-based page index and positive page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPagination")]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct RawPagination {
    page_index: usize,
    page_size: usize,
}

impl TryFrom<RawPagination> for PaginationState {
    type Error = Error;

    fn try_from(raw: RawPagination) -> Result<Self> {
        let state = Self::new(raw.page_size)?;
        Ok(Self {
            page_index: raw.page_index,
            ..state
        })
    }
}

impl PaginationState {
    /// First page with the given page size
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        Ok(Self {
            page_index: 0,
            page_size,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(row_count / page_size)`, zero when there are no rows
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Page index as displayed: forced to 0 when there are no pages
    pub fn effective_page_index(&self, row_count: usize) -> usize {
        if self.page_count(row_count) == 0 {
            0
        } else {
            self.page_index
        }
    }

    pub fn can_next_page(&self, row_count: usize) -> bool {
        self.page_index < self.page_count(row_count).saturating_sub(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Advance one page; no-op on the last page
    #[must_use]
    pub fn next_page(self, row_count: usize) -> Self {
        if self.can_next_page(row_count) {
            Self {
                page_index: self.page_index + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Go back one page; no-op on the first page
    #[must_use]
    pub fn previous_page(self) -> Self {
        if self.can_previous_page() {
            Self {
                page_index: self.page_index - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Replace the page size, keeping the page index as is
    ///
    /// The index is deliberately not clamped: the page-size control pairs
    /// this with [`PaginationState::reset_page_index`], and callers that skip
    /// the reset keep their index (possibly past the last page, which then
    /// shows no rows).
    ///
    /// # Panics
    /// If `page_size` is zero.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be greater than zero");
        Self { page_size, ..self }
    }

    /// Fallible form of [`PaginationState::with_page_size`]
    pub fn try_with_page_size(self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        Ok(Self { page_size, ..self })
    }

    /// Jump to a page, clamped to the existing pages
    #[must_use]
    pub fn with_page_index(self, page_index: usize, row_count: usize) -> Self {
        let last = self.page_count(row_count).saturating_sub(1);
        Self {
            page_index: page_index.min(last),
            ..self
        }
    }

    #[must_use]
    pub fn reset_page_index(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }

    /// Row range of the current page within the filtered rows
    ///
    /// Empty when there are no rows or the index is past the last page.
    pub fn visible_range(&self, row_count: usize) -> Range<usize> {
        let start = self
            .effective_page_index(row_count)
            .saturating_mul(self.page_size)
            .min(row_count);
        let end = start.saturating_add(self.page_size).min(row_count);
        start..end
    }

    /// Slice of `rows` shown on the current page
    pub fn page_of<'a, R>(&self, rows: &'a [R]) -> &'a [R] {
        &rows[self.visible_range(rows.len())]
    }
}
