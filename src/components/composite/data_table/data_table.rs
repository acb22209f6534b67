//! DataTable Component
//!
//! Owns the table state and runs the row model → filter → pagination
//! pipeline on every render.

use std::fmt;

use tracing::debug;

use super::column::{Columns, HeaderContext};
use super::display::PaginationControls;
use super::filter::{ColumnFilter, ColumnFilters, FilterValue, apply_filters};
use super::pagination::PaginationState;
use super::row_model::{RowView, build_rows};
use super::state::{TableAction, TableHandle, TableState, TableStore};
use crate::constants::{CREATE_ACTION, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::error::{Error, Result};

/// Caller-supplied table flags
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub title: Option<String>,
    pub loading: bool,
    pub show_pagination: bool,
    /// First option is the initial page size
    pub page_size_options: Vec<usize>,
    pub empty_state_message: String,
    /// Return to the first page when filters or rows change
    pub auto_reset_page_index: bool,
    pub default_filters: ColumnFilters,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: None,
            loading: false,
            show_pagination: true,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            empty_state_message: "No results".to_string(),
            auto_reset_page_index: true,
            default_filters: ColumnFilters::new(),
        }
    }
}

impl TableOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn show_pagination(mut self, show: bool) -> Self {
        self.show_pagination = show;
        self
    }

    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    pub fn empty_state_message(mut self, message: impl Into<String>) -> Self {
        self.empty_state_message = message.into();
        self
    }

    pub fn auto_reset_page_index(mut self, enabled: bool) -> Self {
        self.auto_reset_page_index = enabled;
        self
    }

    pub fn default_filters(mut self, filters: ColumnFilters) -> Self {
        self.default_filters = filters;
        self
    }

    /// Initial page size (first option)
    pub fn initial_page_size(&self) -> Result<usize> {
        let Some(&first) = self.page_size_options.first() else {
            return Err(Error::EmptyPageSizeOptions);
        };
        if let Some(&size) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(Error::InvalidPageSize { size });
        }
        Ok(first)
    }
}

/// Optional rendering collaborators
pub struct TableSlots<V> {
    loading: Option<Box<dyn Fn() -> V>>,
    create_action: Option<Box<dyn Fn(&str) -> V>>,
    filters: Option<Box<dyn Fn(&TableHandle) -> V>>,
}

impl<V> Default for TableSlots<V> {
    fn default() -> Self {
        Self {
            loading: None,
            create_action: None,
            filters: None,
        }
    }
}

/// Body of a ready table
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<V> {
    /// Rendered cells of the visible rows
    Rows(Vec<Vec<V>>),
    /// No filtered rows; spans every column
    Empty { message: String, colspan: usize },
}

/// A table with its pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyTable<V> {
    pub title: Option<String>,
    pub create_action: Option<V>,
    pub filters_ui: Option<V>,
    pub headers: Vec<V>,
    pub body: TableBody<V>,
    pub pagination: Option<PaginationControls>,
}

/// Render output of a [`DataTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum TableView<V> {
    /// Loading short-circuits the pipeline; `indicator` is `None` when the
    /// caller should show its default indicator
    Loading {
        title: Option<String>,
        create_action: Option<V>,
        indicator: Option<V>,
    },
    Ready(ReadyTable<V>),
}

/// DataTable component
pub struct DataTable<T, V = String> {
    columns: Columns<T, V>,
    rows: Vec<T>,
    options: TableOptions,
    slots: TableSlots<V>,
    store: TableStore,
}

impl<T, V> DataTable<T, V> {
    /// Create a new data table
    ///
    /// Filters start from `options.default_filters`, pagination from page 0
    /// with the first page size option.
    pub fn new(columns: Columns<T, V>, options: TableOptions) -> Result<Self> {
        let pagination = PaginationState::new(options.initial_page_size()?)?;
        let state = TableState::new(options.default_filters.clone(), pagination);
        Ok(Self {
            columns,
            rows: Vec::new(),
            options,
            slots: TableSlots::default(),
            store: TableStore::new(state),
        })
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }

    /// Custom loading indicator
    pub fn with_loading_indicator(mut self, render: impl Fn() -> V + 'static) -> Self {
        self.slots.loading = Some(Box::new(render));
        self
    }

    /// Create-action slot, invoked with the action name `"create"`
    pub fn with_create_action(mut self, render: impl Fn(&str) -> V + 'static) -> Self {
        self.slots.create_action = Some(Box::new(render));
        self
    }

    /// Custom filter UI receiving the filter setter
    pub fn with_filters_ui(mut self, render: impl Fn(&TableHandle) -> V + 'static) -> Self {
        self.slots.filters = Some(Box::new(render));
        self
    }

    // ==================== Getters ====================

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &Columns<T, V> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn state(&self) -> &TableState {
        self.store.state()
    }

    pub fn filters(&self) -> &ColumnFilters {
        &self.store.state().filters
    }

    pub fn pagination(&self) -> PaginationState {
        self.store.state().pagination
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn is_loading(&self) -> bool {
        self.options.loading
    }

    /// At least one filter is active
    pub fn is_filtered(&self) -> bool {
        !self.filters().is_empty()
    }

    /// Setter for collaborators; queued actions apply on [`DataTable::commit`]
    pub fn handle(&self) -> TableHandle {
        self.store.handle()
    }

    // ==================== Setters ====================

    /// Replace the records
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if self.options.auto_reset_page_index {
            let state = self.state();
            if state.pagination.page_index() != 0 {
                let next = TableState::new(state.filters.clone(), state.pagination.reset_page_index());
                self.store.replace(next);
            }
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Apply an action to the latest state
    pub fn dispatch(&mut self, action: TableAction) {
        let filtered = self.filtered_row_count();
        self.store
            .apply(&action, filtered, self.options.auto_reset_page_index);
    }

    /// Apply every queued action in order; returns how many were applied
    pub fn commit(&mut self) -> usize {
        let mut applied = 0;
        while let Some(action) = self.store.next_pending() {
            self.dispatch(action);
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, generation = self.generation(), "Committed queued table actions");
        }
        applied
    }

    pub fn next_page(&mut self) {
        self.dispatch(TableAction::NextPage);
    }

    pub fn previous_page(&mut self) {
        self.dispatch(TableAction::PreviousPage);
    }

    /// Replace the page size; the page index is kept (see
    /// [`PaginationState::with_page_size`])
    pub fn set_page_size(&mut self, size: usize) {
        self.dispatch(TableAction::SetPageSize(size));
    }

    /// Page size change followed by a reset, as the page size control does
    pub fn select_page_size(&mut self, size: usize) {
        self.set_page_size(size);
        self.reset_page_index();
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.dispatch(TableAction::SetPageIndex(index));
    }

    pub fn reset_page_index(&mut self) {
        self.dispatch(TableAction::ResetPageIndex);
    }

    pub fn set_filter(&mut self, id: impl Into<String>, value: impl Into<FilterValue>) {
        self.dispatch(TableAction::SetFilter(ColumnFilter::new(id, value)));
    }

    pub fn remove_filter(&mut self, id: impl Into<String>) {
        self.dispatch(TableAction::RemoveFilter(id.into()));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(TableAction::ClearFilters);
    }

    // ==================== Derivations ====================

    pub fn core_rows(&self) -> Vec<RowView<'_, T, V>> {
        build_rows(&self.rows, &self.columns)
    }

    pub fn filtered_rows(&self) -> Vec<RowView<'_, T, V>> {
        apply_filters(&self.core_rows(), self.filters())
    }

    pub fn filtered_row_count(&self) -> usize {
        if self.is_filtered() {
            self.filtered_rows().len()
        } else {
            self.rows.len()
        }
    }

    /// Rows of the current page
    pub fn visible_rows(&self) -> Vec<RowView<'_, T, V>> {
        let filtered = self.filtered_rows();
        self.pagination().page_of(&filtered).to_vec()
    }

    pub fn page_count(&self) -> usize {
        self.pagination().page_count(self.filtered_row_count())
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination().can_next_page(self.filtered_row_count())
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination().can_previous_page()
    }

    pub fn pagination_controls(&self) -> PaginationControls {
        self.controls_for(self.filtered_row_count())
    }

    fn controls_for(&self, filtered_rows: usize) -> PaginationControls {
        let pagination = self.pagination();
        PaginationControls {
            is_filtered: self.is_filtered(),
            filtered_rows,
            total_rows: self.rows.len(),
            page_size: pagination.page_size(),
            current_page: pagination.effective_page_index(filtered_rows),
            page_count: pagination.page_count(filtered_rows),
            is_next_disabled: !pagination.can_next_page(filtered_rows),
            is_prev_disabled: !pagination.can_previous_page(),
            page_size_options: self.options.page_size_options.clone(),
        }
    }

    // ==================== Render ====================

    /// Run the pipeline against the latest state
    pub fn render(&self) -> TableView<V> {
        let title = self.options.title.clone();
        let create_action = self
            .slots
            .create_action
            .as_ref()
            .map(|render| render(CREATE_ACTION));

        if self.options.loading {
            return TableView::Loading {
                title,
                create_action,
                indicator: self.slots.loading.as_ref().map(|render| render()),
            };
        }

        let filters_ui = self.slots.filters.as_ref().map(|render| render(&self.handle()));

        let headers = self
            .columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                column.render_header(&HeaderContext {
                    column_id: column.id(),
                    column_index,
                    filter: self.filters().get(column.id()),
                })
            })
            .collect();

        let filtered = self.filtered_rows();
        let body = if filtered.is_empty() {
            TableBody::Empty {
                message: self.options.empty_state_message.clone(),
                colspan: self.columns.len(),
            }
        } else {
            TableBody::Rows(
                self.pagination()
                    .page_of(&filtered)
                    .iter()
                    .map(RowView::render_cells)
                    .collect(),
            )
        };

        let pagination = self
            .options
            .show_pagination
            .then(|| self.controls_for(filtered.len()));

        TableView::Ready(ReadyTable {
            title,
            create_action,
            filters_ui,
            headers,
            body,
            pagination,
        })
    }
}

impl<T, V> fmt::Debug for DataTable<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("options", &self.options)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::composite::data_table::column::ColumnDef;

    #[derive(Debug, Clone)]
    struct Device {
        id: u32,
        name: String,
        site: &'static str,
    }

    fn devices(count: u32) -> Vec<Device> {
        (0..count)
            .map(|id| Device {
                id,
                name: format!("WTG-{id:03}"),
                site: if id % 2 == 0 { "North" } else { "South" },
            })
            .collect()
    }

    fn columns() -> Columns<Device> {
        Columns::new(vec![
            ColumnDef::text("id", "ID", |d: &Device| d.id.into()),
            ColumnDef::text("name", "Name", |d: &Device| (&d.name).into()),
            ColumnDef::text("site", "Site", |d: &Device| d.site.into()),
        ])
        .expect("unique ids")
    }

    fn table(count: u32) -> DataTable<Device> {
        DataTable::new(columns(), TableOptions::default())
            .expect("valid options")
            .with_rows(devices(count))
    }

    fn ready(view: TableView<String>) -> ReadyTable<String> {
        match view {
            TableView::Ready(ready) => ready,
            TableView::Loading { .. } => panic!("expected a ready table"),
        }
    }

    #[test]
    fn initial_state_uses_first_page_size_option() {
        let t = DataTable::new(columns(), TableOptions::default().page_size_options([20, 50]))
            .expect("valid options");
        assert_eq!(t.pagination().page_size(), 20);
        assert_eq!(t.pagination().page_index(), 0);
        assert_eq!(t.generation(), 0);
    }

    #[test]
    fn invalid_page_size_options_are_rejected() {
        let empty = DataTable::new(columns(), TableOptions::default().page_size_options(Vec::<usize>::new()));
        assert!(matches!(empty, Err(Error::EmptyPageSizeOptions)));

        let zero = DataTable::new(columns(), TableOptions::default().page_size_options([10, 0]));
        assert!(matches!(zero, Err(Error::InvalidPageSize { size: 0 })));
    }

    #[test]
    fn renders_headers_and_first_page() {
        let view = ready(table(25).render());
        assert_eq!(view.headers, vec!["ID", "Name", "Site"]);
        let TableBody::Rows(rows) = &view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], vec!["0", "WTG-000", "North"]);

        let controls = view.pagination.expect("pagination shown");
        assert_eq!(controls.range(), "1-10");
        assert_eq!(controls.page_count, 3);
        assert!(controls.is_prev_disabled);
        assert!(!controls.is_next_disabled);
    }

    #[test]
    fn last_page_range_and_rows() {
        let mut t = table(25);
        t.next_page();
        t.next_page();
        t.next_page();
        assert_eq!(t.pagination().page_index(), 2);
        assert_eq!(t.visible_rows().len(), 5);
        assert_eq!(t.pagination_controls().range(), "21-25");
        assert!(!t.can_next_page());
    }

    #[test]
    fn zero_rows_show_empty_state_with_headers() {
        let view = ready(table(0).render());
        assert_eq!(view.headers.len(), 3);
        assert_eq!(
            view.body,
            TableBody::Empty {
                message: "No results".to_string(),
                colspan: 3,
            }
        );
        assert_eq!(view.pagination.expect("pagination shown").page_count, 0);
    }

    #[test]
    fn page_size_then_reset_on_large_table() {
        let mut t = table(120);
        t.set_page_index(1);
        t.set_page_size(50);
        assert_eq!(t.pagination().page_index(), 1);
        t.reset_page_index();
        assert_eq!(t.pagination().page_index(), 0);
        assert_eq!(t.page_count(), 3);
    }

    #[test]
    fn huge_page_size_without_reset_keeps_range_defined() {
        let mut t = table(20);
        t.next_page();
        t.set_page_size(usize::MAX);
        assert_eq!(t.pagination().page_index(), 1);

        let controls = t.pagination_controls();
        assert_eq!(controls.range(), format!("{}-20", usize::MAX));
        assert!(controls.is_next_disabled);
        assert!(t.visible_rows().is_empty());
    }

    #[test]
    fn filters_narrow_rows_and_scope() {
        let mut t = table(25);
        t.set_filter("site", "north");
        assert!(t.is_filtered());
        assert_eq!(t.filtered_row_count(), 13);

        let controls = t.pagination_controls();
        assert_eq!(controls.filtered_rows, 13);
        assert_eq!(controls.total_rows, 25);
        assert_eq!(controls.summary("en"), "1-10 of 13");
    }

    #[test]
    fn match_all_and_match_none_filters_empty_the_table() {
        let mut t = table(25);
        t.set_filter("name", "WTG");
        t.set_filter("site", "West");
        assert!(t.filtered_rows().is_empty());
        assert!(matches!(ready(t.render()).body, TableBody::Empty { .. }));
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut t = table(25);
        t.next_page();
        t.set_filter("site", "south");
        assert_eq!(t.pagination().page_index(), 0);
    }

    #[test]
    fn set_rows_returns_to_first_page() {
        let mut t = table(25);
        t.next_page();
        t.set_rows(devices(40));
        assert_eq!(t.pagination().page_index(), 0);
    }

    #[test]
    fn loading_short_circuits() {
        let mut t = table(25).with_loading_indicator(|| "spinner".to_string());
        t.set_loading(true);
        match t.render() {
            TableView::Loading { indicator, .. } => assert_eq!(indicator.as_deref(), Some("spinner")),
            TableView::Ready(_) => panic!("expected loading"),
        }
    }

    #[test]
    fn slots_are_rendered() {
        let t = table(3)
            .with_create_action(|action| format!("[{action}]"))
            .with_filters_ui(|_handle| "filters".to_string());
        let view = ready(t.render());
        assert_eq!(view.create_action.as_deref(), Some("[create]"));
        assert_eq!(view.filters_ui.as_deref(), Some("filters"));
    }

    #[test]
    fn queued_filter_changes_apply_on_commit() {
        let mut t = table(25);
        let handle = t.handle();
        handle.set_filter("site", "south");
        handle.set_filters(|prev| prev.clone().with("name", "WTG-00"));

        assert!(!t.is_filtered());
        assert_eq!(t.commit(), 2);
        assert_eq!(t.generation(), 2);
        // WTG-001 .. WTG-009 on the south site
        assert_eq!(t.filtered_row_count(), 5);
    }

    #[test]
    fn default_filters_apply_from_the_start() {
        let options = TableOptions::default()
            .default_filters(ColumnFilters::new().with("site", "south"));
        let t = DataTable::new(columns(), options)
            .expect("valid options")
            .with_rows(devices(10));
        assert_eq!(t.filtered_row_count(), 5);
    }

    #[test]
    fn hidden_pagination() {
        let t = DataTable::new(columns(), TableOptions::default().show_pagination(false))
            .expect("valid options")
            .with_rows(devices(5));
        assert!(ready(t.render()).pagination.is_none());
    }
}
