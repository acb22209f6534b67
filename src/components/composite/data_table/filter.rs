//! Column Filters
//!
//! Column-scoped filter state and the stateless engine that applies it to
//! the core row model.

use std::fmt;
use std::sync::Arc;

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::column::{CellValue, ColumnDef};
use super::row_model::RowView;

/// Value a column filter compares cells against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    /// Inclusive range, an open end is unbounded
    Range { min: Option<f64>, max: Option<f64> },
    Bool(bool),
    OneOf(Vec<String>),
}

impl FilterValue {
    /// Empty values clear the filter instead of being stored
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::OneOf(values) => values.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::Number(_) | FilterValue::Bool(_) => false,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Range { .. } | FilterValue::OneOf(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// A filter targeting one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Active filters keyed by column identifier, in insertion order
///
/// Holds at most one value per column. Serializes as a list of
/// [`ColumnFilter`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnFilter>", into = "Vec<ColumnFilter>")]
pub struct ColumnFilters {
    entries: LinkedHashMap<String, FilterValue>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for a column, replacing any previous value in place
    ///
    /// An empty value removes the column's filter. Returns the previous value.
    pub fn set(&mut self, filter: ColumnFilter) -> Option<FilterValue> {
        let ColumnFilter { id, value } = filter;
        if value.is_empty() {
            return self.entries.remove(&id);
        }
        match self.entries.get_mut(&id) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => self.entries.insert(id, value),
        }
    }

    /// Builder form of [`ColumnFilters::set`]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(ColumnFilter::new(id, value));
        self
    }

    pub fn remove(&mut self, id: &str) -> Option<FilterValue> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&FilterValue> {
        self.entries.get(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn to_vec(&self) -> Vec<ColumnFilter> {
        self.iter()
            .map(|(id, value)| ColumnFilter::new(id, value.clone()))
            .collect()
    }
}

impl FromIterator<ColumnFilter> for ColumnFilters {
    fn from_iter<I: IntoIterator<Item = ColumnFilter>>(iter: I) -> Self {
        let mut filters = Self::new();
        for filter in iter {
            filters.set(filter);
        }
        filters
    }
}

impl From<Vec<ColumnFilter>> for ColumnFilters {
    fn from(filters: Vec<ColumnFilter>) -> Self {
        filters.into_iter().collect()
    }
}

impl From<ColumnFilters> for Vec<ColumnFilter> {
    fn from(filters: ColumnFilters) -> Self {
        filters.to_vec()
    }
}

type CustomFilter = Arc<dyn Fn(&CellValue, &FilterValue) -> bool + Send + Sync>;

/// Per-column matching strategy
#[derive(Clone, Default)]
pub enum FilterFn {
    /// Pick a strategy from the cell value: text includes, number range,
    /// bool equality
    #[default]
    Auto,
    /// Case-insensitive substring
    IncludesString,
    /// Case-sensitive substring
    IncludesStringSensitive,
    /// Case-insensitive equality of the text form
    EqualsString,
    /// Equality of value kind and content
    Equals,
    /// Numeric cell within an inclusive range
    InNumberRange,
    /// Text form equal to one of a set of values
    ArrIncludesSome,
    Custom(CustomFilter),
}

impl FilterFn {
    pub fn custom(f: impl Fn(&CellValue, &FilterValue) -> bool + Send + Sync + 'static) -> Self {
        FilterFn::Custom(Arc::new(f))
    }

    /// Evaluate a cell against a filter value
    ///
    /// Mismatched value kinds evaluate to `false`.
    pub fn matches(&self, cell: &CellValue, filter: &FilterValue) -> bool {
        match self {
            FilterFn::Auto => match cell {
                CellValue::Text(_) => FilterFn::IncludesString.matches(cell, filter),
                CellValue::Integer(_) | CellValue::Float(_) => {
                    FilterFn::InNumberRange.matches(cell, filter)
                }
                CellValue::Bool(_) => FilterFn::Equals.matches(cell, filter),
                CellValue::Empty => false,
            },
            FilterFn::IncludesString => filter.as_text().is_some_and(|needle| {
                cell.to_string()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            }),
            FilterFn::IncludesStringSensitive => filter
                .as_text()
                .is_some_and(|needle| cell.to_string().contains(&needle)),
            FilterFn::EqualsString => filter
                .as_text()
                .is_some_and(|expected| cell.to_string().to_lowercase() == expected.to_lowercase()),
            FilterFn::Equals => match (cell, filter) {
                (CellValue::Text(a), FilterValue::Text(b)) => a == b,
                (CellValue::Integer(_) | CellValue::Float(_), FilterValue::Number(n)) => {
                    cell.as_f64() == Some(*n)
                }
                (CellValue::Bool(a), FilterValue::Bool(b)) => a == b,
                _ => false,
            },
            FilterFn::InNumberRange => {
                let Some(value) = cell.as_f64() else {
                    return false;
                };
                match filter {
                    FilterValue::Range { min, max } => {
                        let (min, max) = match (*min, *max) {
                            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
                            bounds => bounds,
                        };
                        min.is_none_or(|lo| value >= lo) && max.is_none_or(|hi| value <= hi)
                    }
                    FilterValue::Number(n) => value == *n,
                    FilterValue::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| value == n),
                    FilterValue::Bool(_) | FilterValue::OneOf(_) => false,
                }
            }
            FilterFn::ArrIncludesSome => {
                let text = cell.to_string();
                match filter {
                    FilterValue::OneOf(values) => values.iter().any(|v| *v == text),
                    other => other.as_text().is_some_and(|v| v == text),
                }
            }
            FilterFn::Custom(f) => f(cell, filter),
        }
    }
}

impl fmt::Debug for FilterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterFn::Auto => "Auto",
            FilterFn::IncludesString => "IncludesString",
            FilterFn::IncludesStringSensitive => "IncludesStringSensitive",
            FilterFn::EqualsString => "EqualsString",
            FilterFn::Equals => "Equals",
            FilterFn::InNumberRange => "InNumberRange",
            FilterFn::ArrIncludesSome => "ArrIncludesSome",
            FilterFn::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

/// Keep the rows that satisfy every active filter
///
/// Order-preserving. Filters naming a column the rows don't have are
/// ignored, and an empty filter set returns every row.
pub fn apply_filters<'t, T, V>(
    rows: &[RowView<'t, T, V>],
    filters: &ColumnFilters,
) -> Vec<RowView<'t, T, V>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    if filters.is_empty() {
        return rows.to_vec();
    }

    let columns = first.columns();
    let active: Vec<(&ColumnDef<T, V>, &FilterValue)> = filters
        .iter()
        .filter_map(|(id, value)| {
            let column = columns.get(id);
            if column.is_none() {
                debug!(column = id, "Ignoring filter for unknown column");
            }
            column.map(|column| (column, value))
        })
        .collect();

    rows.iter()
        .filter(|row| {
            active.iter().all(|(column, value)| {
                column
                    .strategy()
                    .matches(&column.value(row.record()), value)
            })
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::composite::data_table::column::Columns;
    use crate::components::composite::data_table::row_model::build_rows;

    #[derive(Debug)]
    struct Turbine {
        name: &'static str,
        site: &'static str,
        power: f64,
        online: bool,
    }

    fn fleet() -> Vec<Turbine> {
        vec![
            Turbine { name: "WTG-01", site: "North", power: 1.5, online: true },
            Turbine { name: "WTG-02", site: "north", power: 2.0, online: false },
            Turbine { name: "WTG-03", site: "South", power: 3.5, online: true },
            Turbine { name: "PV-01", site: "East", power: 0.8, online: true },
        ]
    }

    fn columns() -> Columns<Turbine> {
        Columns::new(vec![
            ColumnDef::text("name", "Name", |t: &Turbine| t.name.into()),
            ColumnDef::text("site", "Site", |t: &Turbine| t.site.into())
                .filter_fn(FilterFn::EqualsString),
            ColumnDef::text("power", "Power", |t: &Turbine| t.power.into()),
            ColumnDef::text("online", "Online", |t: &Turbine| t.online.into()),
        ])
        .expect("unique ids")
    }

    fn names<V>(rows: &[RowView<'_, Turbine, V>]) -> Vec<&'static str> {
        rows.iter().map(|r| r.record().name).collect()
    }

    #[test]
    fn empty_filter_set_is_identity() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filtered = apply_filters(&rows, &ColumnFilters::new());
        assert_eq!(names(&filtered), names(&rows));
    }

    #[test]
    fn auto_text_filter_is_case_insensitive_substring() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filtered = apply_filters(&rows, &ColumnFilters::new().with("name", "wtg"));
        assert_eq!(names(&filtered), vec!["WTG-01", "WTG-02", "WTG-03"]);
    }

    #[test]
    fn per_column_strategy_is_used() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filtered = apply_filters(&rows, &ColumnFilters::new().with("site", "NORTH"));
        assert_eq!(names(&filtered), vec!["WTG-01", "WTG-02"]);

        let partial = apply_filters(&rows, &ColumnFilters::new().with("site", "nor"));
        assert!(partial.is_empty());
    }

    #[test]
    fn auto_number_filter_uses_range() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filters = ColumnFilters::new().with(
            "power",
            FilterValue::Range { min: Some(1.0), max: Some(2.0) },
        );
        assert_eq!(names(&apply_filters(&rows, &filters)), vec!["WTG-01", "WTG-02"]);

        let open_ended =
            ColumnFilters::new().with("power", FilterValue::Range { min: Some(3.0), max: None });
        assert_eq!(names(&apply_filters(&rows, &open_ended)), vec!["WTG-03"]);
    }

    #[test]
    fn filters_are_anded_across_columns() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filters = ColumnFilters::new().with("name", "wtg").with("online", true);
        assert_eq!(names(&apply_filters(&rows, &filters)), vec!["WTG-01", "WTG-03"]);
    }

    #[test]
    fn match_all_and_match_none_gives_empty() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filters = ColumnFilters::new().with("name", "-0").with("site", "West");
        assert!(apply_filters(&rows, &filters).is_empty());
    }

    #[test]
    fn unknown_column_filter_is_ignored() {
        let data = fleet();
        let columns = columns();
        let rows = build_rows(&data, &columns);
        let filters = ColumnFilters::new().with("missing", "anything");
        assert_eq!(apply_filters(&rows, &filters).len(), rows.len());
    }

    #[test]
    fn custom_strategy() {
        let data = fleet();
        let columns = Columns::new(vec![
            ColumnDef::<Turbine>::text("name", "Name", |t: &Turbine| t.name.into()).filter_fn(
                FilterFn::custom(|cell, filter| match filter {
                    FilterValue::Text(prefix) => cell.to_string().starts_with(prefix.as_str()),
                    _ => false,
                }),
            ),
        ])
        .expect("unique ids");
        let rows = build_rows(&data, &columns);
        let filtered = apply_filters(&rows, &ColumnFilters::new().with("name", "PV"));
        assert_eq!(names(&filtered), vec!["PV-01"]);
    }

    #[test]
    fn later_filter_replaces_earlier_in_place() {
        let mut filters = ColumnFilters::new().with("name", "a").with("site", "b");
        let previous = filters.set(ColumnFilter::new("name", "c"));

        assert_eq!(previous, Some(FilterValue::Text("a".into())));
        assert_eq!(filters.len(), 2);
        let ids: Vec<_> = filters.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["name", "site"]);
        assert_eq!(filters.get("name"), Some(&FilterValue::Text("c".into())));
    }

    #[test]
    fn empty_value_removes_filter() {
        let mut filters = ColumnFilters::new().with("name", "a");
        filters.set(ColumnFilter::new("name", ""));
        assert!(filters.is_empty());
    }

    #[test]
    fn mismatched_kinds_do_not_match() {
        assert!(!FilterFn::InNumberRange.matches(&CellValue::Integer(3), &FilterValue::Bool(true)));
        assert!(!FilterFn::Equals.matches(&CellValue::Text("1".into()), &FilterValue::Number(1.0)));
        assert!(FilterFn::InNumberRange.matches(&CellValue::Integer(3), &FilterValue::from("3")));
    }

    #[test]
    fn filters_serialize_as_list() {
        let filters = ColumnFilters::new().with("name", "wtg");
        let json = serde_json::to_string(&filters).expect("serialize");
        assert_eq!(json, r#"[{"id":"name","value":{"Text":"wtg"}}]"#);
        let back: ColumnFilters = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, filters);
    }
}
