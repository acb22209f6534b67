//! DataTable Component
//!
//! A generic data table with client-side filtering and pagination.
//!
//! ```text
//! records → core rows → filtered rows → page slice → TableView
//! ```

pub mod column;
pub mod data_table;
pub mod display;
pub mod filter;
pub mod pagination;
#[cfg(feature = "gpui")]
pub mod pagination_bar;
pub mod row_model;
pub mod state;
pub mod text;
#[cfg(feature = "gpui")]
pub mod view;

pub use column::{CellContext, CellValue, ColumnDef, Columns, HeaderContext, Renderable};
pub use data_table::{DataTable, ReadyTable, TableBody, TableOptions, TableView};
pub use display::{PaginationControls, RangeInput, describe_range};
pub use filter::{ColumnFilter, ColumnFilters, FilterFn, FilterValue, apply_filters};
pub use pagination::PaginationState;
#[cfg(feature = "gpui")]
pub use pagination_bar::PaginationBar;
pub use row_model::{RowView, build_rows};
pub use state::{FilterUpdater, TableAction, TableHandle, TableState, TableStore, reduce};
pub use text::render_text;
#[cfg(feature = "gpui")]
pub use view::DataTableView;
