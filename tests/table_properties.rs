#![allow(clippy::unwrap_used)]
//! Property tests for the filter and pagination engines

use dfc_table::{ColumnDef, ColumnFilters, Columns, DataTable, PaginationState, TableOptions, apply_filters, build_rows};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Reading {
    name: String,
    value: i64,
}

fn columns() -> Columns<Reading> {
    Columns::new(vec![
        ColumnDef::text("name", "Name", |r: &Reading| (&r.name).into()),
        ColumnDef::text("value", "Value", |r: &Reading| r.value.into()),
    ])
    .unwrap()
}

fn readings() -> impl Strategy<Value = Vec<Reading>> {
    prop::collection::vec(
        ("[a-c]{0,4}", -50i64..50).prop_map(|(name, value)| Reading { name, value }),
        0..60,
    )
}

proptest! {
    /// Property: no filters returns every row in order
    #[test]
    fn prop_empty_filters_are_identity(records in readings()) {
        let columns = columns();
        let rows = build_rows(&records, &columns);
        let filtered = apply_filters(&rows, &ColumnFilters::new());
        let indices: Vec<usize> = filtered.iter().map(|r| r.index()).collect();
        prop_assert_eq!(indices, (0..records.len()).collect::<Vec<_>>());
    }

    /// Property: filtering yields an order-preserving subsequence
    #[test]
    fn prop_filtered_rows_are_subsequence(records in readings(), needle in "[a-c]{1,2}", min in -50i64..50) {
        let columns = columns();
        let rows = build_rows(&records, &columns);
        let filters = ColumnFilters::new()
            .with("name", needle.as_str())
            .with("value", dfc_table::FilterValue::Range { min: Some(min as f64), max: None });
        let filtered = apply_filters(&rows, &filters);

        prop_assert!(filtered.len() <= rows.len());
        let indices: Vec<usize> = filtered.iter().map(|r| r.index()).collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for row in &filtered {
            let record = row.record();
            prop_assert!(record.name.contains(needle.as_str()));
            prop_assert!(record.value >= min);
        }
    }

    /// Property: page count is the ceiling of rows over page size
    #[test]
    fn prop_page_count_is_ceiling(rows in 0usize..10_000, size in 1usize..200) {
        let p = PaginationState::new(size).unwrap();
        let expected = if rows == 0 { 0 } else { (rows + size - 1) / size };
        prop_assert_eq!(p.page_count(rows), expected);
    }

    /// Property: navigation clamps at both ends
    #[test]
    fn prop_navigation_is_idempotent_at_bounds(rows in 0usize..500, size in 1usize..50, jumps in 0usize..40) {
        let mut p = PaginationState::new(size).unwrap();
        for _ in 0..jumps {
            p = p.next_page(rows);
        }
        prop_assert!(p.page_index() <= p.page_count(rows).saturating_sub(1));

        let last = p.with_page_index(usize::MAX, rows);
        prop_assert_eq!(last.next_page(rows), last);

        let first = p.reset_page_index();
        prop_assert_eq!(first.page_index(), 0);
        prop_assert_eq!(first.previous_page(), first);
    }

    /// Property: the visible page never exceeds the page size
    #[test]
    fn prop_visible_rows_fit_page(records in readings(), size in 1usize..20, page in 0usize..10) {
        let mut table = DataTable::new(columns(), TableOptions::default().page_size_options([size]))
            .unwrap()
            .with_rows(records);
        table.set_page_index(page);
        prop_assert!(table.visible_rows().len() <= size);
        prop_assert!(table.pagination().page_index() <= table.page_count().saturating_sub(1));
    }
}
