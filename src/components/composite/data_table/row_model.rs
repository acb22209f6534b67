//! Core Row Model
//!
//! Materializes one row view per record, in input order.

use std::fmt;

use super::column::{CellContext, CellValue, Columns};

/// A record paired with the column schema
///
/// Borrows both; the table's data outlives every row view built from it.
pub struct RowView<'t, T, V = String> {
    index: usize,
    record: &'t T,
    columns: &'t Columns<T, V>,
}

impl<'t, T, V> RowView<'t, T, V> {
    pub fn new(index: usize, record: &'t T, columns: &'t Columns<T, V>) -> Self {
        Self {
            index,
            record,
            columns,
        }
    }

    /// Position of the record in the caller's data
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &'t T {
        self.record
    }

    pub fn columns(&self) -> &'t Columns<T, V> {
        self.columns
    }

    /// Read a column's value, `None` for an unknown column
    pub fn value(&self, column_id: &str) -> Option<CellValue> {
        self.columns
            .get(column_id)
            .map(|column| column.value(self.record))
    }

    /// Render one cell, `None` for an unknown column
    pub fn render_cell(&self, column_id: &str) -> Option<V> {
        let column = self.columns.get(column_id)?;
        Some(column.render_cell(&CellContext {
            record: self.record,
            value: column.value(self.record),
            row_index: self.index,
            column_id: column.id(),
        }))
    }

    /// Render every cell in schema order
    pub fn render_cells(&self) -> Vec<V> {
        self.columns
            .iter()
            .map(|column| {
                column.render_cell(&CellContext {
                    record: self.record,
                    value: column.value(self.record),
                    row_index: self.index,
                    column_id: column.id(),
                })
            })
            .collect()
    }
}

impl<T, V> Clone for RowView<'_, T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for RowView<'_, T, V> {}

impl<T, V> fmt::Debug for RowView<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowView")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Build the core row model
///
/// Column identifiers are already unique: [`Columns::new`] rejects duplicates.
pub fn build_rows<'t, T, V>(records: &'t [T], columns: &'t Columns<T, V>) -> Vec<RowView<'t, T, V>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| RowView::new(index, record, columns))
        .collect()
}
