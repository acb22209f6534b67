//! Pagination Display
//!
//! Range descriptor and the control surface handed to pagination renderers.

use serde::Serialize;

use super::state::TableAction;
use crate::states::{i18n_range_summary, i18n_table};

/// Inputs of [`describe_range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeInput {
    pub is_filtered: bool,
    pub filtered_count: usize,
    pub total_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

/// 1-based inclusive range of the current page, e.g. `"11-20"`
///
/// The first page always starts at 1, so an empty scope gives `"1-0"`.
pub fn describe_range(input: &RangeInput) -> String {
    let scope = if input.is_filtered {
        input.filtered_count
    } else {
        input.total_count
    };

    if input.page_index == 0 {
        return format!("1-{}", input.page_size.min(scope));
    }

    let start = input.page_index.saturating_mul(input.page_size).saturating_add(1);
    let end = input
        .page_index
        .saturating_add(1)
        .saturating_mul(input.page_size)
        .min(scope);
    format!("{start}-{end}")
}

/// Everything a pagination control needs to render and act
///
/// Callbacks are expressed as [`TableAction`]s for the caller to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub is_filtered: bool,
    pub filtered_rows: usize,
    pub total_rows: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub page_count: usize,
    pub is_next_disabled: bool,
    pub is_prev_disabled: bool,
    pub page_size_options: Vec<usize>,
}

impl PaginationControls {
    /// Range descriptor for the current page
    pub fn range(&self) -> String {
        describe_range(&RangeInput {
            is_filtered: self.is_filtered,
            filtered_count: self.filtered_rows,
            total_count: self.total_rows,
            page_index: self.current_page,
            page_size: self.page_size,
        })
    }

    /// Row count the range is relative to
    pub fn scope_total(&self) -> usize {
        if self.is_filtered {
            self.filtered_rows
        } else {
            self.total_rows
        }
    }

    /// Translated "1-10 of 25"
    pub fn summary(&self, locale: &str) -> String {
        i18n_range_summary(locale, &self.range(), self.scope_total())
    }

    /// Translated label in front of the page size selector
    pub fn page_size_label(&self, locale: &str) -> String {
        i18n_table(locale, "rows_per_page")
    }

    pub fn reset_page(&self) -> TableAction {
        TableAction::ResetPageIndex
    }

    pub fn update_page_size(&self, size: usize) -> TableAction {
        TableAction::SetPageSize(size)
    }

    pub fn prev_page(&self) -> TableAction {
        TableAction::PreviousPage
    }

    pub fn next_page(&self) -> TableAction {
        TableAction::NextPage
    }

    /// Actions dispatched when a page size option is picked
    pub fn select_page_size(&self, size: usize) -> [TableAction; 2] {
        [self.update_page_size(size), self.reset_page()]
    }
}
