//! Table State Store
//!
//! Filter and pagination state owned by a table, mutated only through
//! [`TableAction`]s:
//!
//! ```text
//! UI Action → TableAction → reduce(latest state) → new generation → render
//! ```
//!
//! Actions sent through a [`TableHandle`] are queued and applied in FIFO order
//! on the next commit, so one generation always strictly follows the prior.

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::filter::{ColumnFilter, ColumnFilters, FilterValue};
use super::pagination::PaginationState;

/// One generation of table state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub filters: ColumnFilters,
    pub pagination: PaginationState,
}

impl TableState {
    pub fn new(filters: ColumnFilters, pagination: PaginationState) -> Self {
        Self {
            filters,
            pagination,
        }
    }
}

/// Function deriving the next filter set from the previous one
#[derive(Clone)]
pub struct FilterUpdater(Arc<dyn Fn(&ColumnFilters) -> ColumnFilters + Send + Sync>);

impl FilterUpdater {
    pub fn new(f: impl Fn(&ColumnFilters) -> ColumnFilters + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, previous: &ColumnFilters) -> ColumnFilters {
        (self.0)(previous)
    }
}

impl fmt::Debug for FilterUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterUpdater")
    }
}

/// Table state mutations
#[derive(Debug, Clone)]
pub enum TableAction {
    NextPage,
    PreviousPage,
    ResetPageIndex,
    /// Replace the page size without touching the page index
    SetPageSize(usize),
    /// Jump to a page, clamped to the existing pages
    SetPageIndex(usize),
    SetFilter(ColumnFilter),
    RemoveFilter(String),
    ReplaceFilters(ColumnFilters),
    UpdateFilters(FilterUpdater),
    ClearFilters,
}

impl TableAction {
    fn name(&self) -> &'static str {
        match self {
            TableAction::NextPage => "next_page",
            TableAction::PreviousPage => "previous_page",
            TableAction::ResetPageIndex => "reset_page_index",
            TableAction::SetPageSize(_) => "set_page_size",
            TableAction::SetPageIndex(_) => "set_page_index",
            TableAction::SetFilter(_) => "set_filter",
            TableAction::RemoveFilter(_) => "remove_filter",
            TableAction::ReplaceFilters(_) => "replace_filters",
            TableAction::UpdateFilters(_) => "update_filters",
            TableAction::ClearFilters => "clear_filters",
        }
    }
}

/// Derive the next state from `state`
///
/// `filtered_rows` is the filtered row count of `state`. With
/// `auto_reset_page_index`, any change to the filter set returns to page 0.
pub fn reduce(
    state: &TableState,
    action: &TableAction,
    filtered_rows: usize,
    auto_reset_page_index: bool,
) -> TableState {
    let pagination = state.pagination;
    let filters = match action {
        TableAction::NextPage => {
            return TableState::new(state.filters.clone(), pagination.next_page(filtered_rows));
        }
        TableAction::PreviousPage => {
            return TableState::new(state.filters.clone(), pagination.previous_page());
        }
        TableAction::ResetPageIndex => {
            return TableState::new(state.filters.clone(), pagination.reset_page_index());
        }
        TableAction::SetPageSize(size) => {
            let pagination = match pagination.try_with_page_size(*size) {
                Ok(next) => next,
                Err(e) => {
                    error!(error = %e, "Rejected page size change");
                    pagination
                }
            };
            return TableState::new(state.filters.clone(), pagination);
        }
        TableAction::SetPageIndex(index) => {
            return TableState::new(
                state.filters.clone(),
                pagination.with_page_index(*index, filtered_rows),
            );
        }
        TableAction::SetFilter(filter) => {
            let mut filters = state.filters.clone();
            filters.set(filter.clone());
            filters
        }
        TableAction::RemoveFilter(id) => {
            let mut filters = state.filters.clone();
            filters.remove(id);
            filters
        }
        TableAction::ReplaceFilters(filters) => filters.clone(),
        TableAction::UpdateFilters(updater) => updater.apply(&state.filters),
        TableAction::ClearFilters => ColumnFilters::new(),
    };

    let pagination = if auto_reset_page_index && filters != state.filters {
        pagination.reset_page_index()
    } else {
        pagination
    };
    TableState::new(filters, pagination)
}

/// Generation-counted holder of the latest [`TableState`]
pub struct TableStore {
    state: TableState,
    generation: u64,
    sender: Sender<TableAction>,
    receiver: Receiver<TableAction>,
}

impl TableStore {
    pub fn new(state: TableState) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            state,
            generation: 0,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Number of mutations applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one action to the latest generation
    pub fn apply(&mut self, action: &TableAction, filtered_rows: usize, auto_reset_page_index: bool) {
        let next = reduce(&self.state, action, filtered_rows, auto_reset_page_index);
        self.generation += 1;
        debug!(
            generation = self.generation,
            action = action.name(),
            page_index = next.pagination.page_index(),
            page_size = next.pagination.page_size(),
            filters = next.filters.len(),
            "Table state updated"
        );
        self.state = next;
    }

    /// Replace the state wholesale (e.g. a data change resetting the page)
    pub fn replace(&mut self, state: TableState) {
        self.generation += 1;
        self.state = state;
    }

    /// Next queued action, if any
    pub fn next_pending(&self) -> Option<TableAction> {
        self.receiver.try_recv().ok()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn handle(&self) -> TableHandle {
        TableHandle {
            sender: self.sender.clone(),
        }
    }
}

impl fmt::Debug for TableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStore")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("pending", &self.pending())
            .finish()
    }
}

/// Cloneable setter handed to filter and pagination collaborators
///
/// Sending only queues the action; it takes effect when the owning table
/// commits.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: Sender<TableAction>,
}

impl TableHandle {
    pub fn send(&self, action: TableAction) {
        if let Err(e) = self.sender.send(action) {
            warn!(action = e.0.name(), "Table dropped, action discarded");
        }
    }

    pub fn set_filter(&self, id: impl Into<String>, value: impl Into<FilterValue>) {
        self.send(TableAction::SetFilter(ColumnFilter::new(id, value)));
    }

    pub fn remove_filter(&self, id: impl Into<String>) {
        self.send(TableAction::RemoveFilter(id.into()));
    }

    /// Queue an updater applied to whatever filters are current at commit time
    pub fn set_filters(
        &self,
        updater: impl Fn(&ColumnFilters) -> ColumnFilters + Send + Sync + 'static,
    ) {
        self.send(TableAction::UpdateFilters(FilterUpdater::new(updater)));
    }

    pub fn clear_filters(&self) {
        self.send(TableAction::ClearFilters);
    }

    pub fn next_page(&self) {
        self.send(TableAction::NextPage);
    }

    pub fn previous_page(&self) {
        self.send(TableAction::PreviousPage);
    }

    /// Page size change paired with a return to the first page
    pub fn select_page_size(&self, size: usize) {
        self.send(TableAction::SetPageSize(size));
        self.send(TableAction::ResetPageIndex);
    }
}
