//! Column Definition
//!
//! Defines table columns, the values their accessors read and the renderers
//! that turn those values into view fragments.

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::filter::{FilterFn, FilterValue};
use crate::error::{Error, Result};

/// Value read from a record by a column accessor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// Numeric view of the value (integers widen to `f64`)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Capability to turn a render context into a view fragment
///
/// Implemented for every `Fn(&Ctx) -> V`, so closures can be used directly.
/// The table only invokes renderers; it never inspects what they produce.
pub trait Renderable<Ctx, V> {
    fn render(&self, ctx: &Ctx) -> V;
}

impl<Ctx, V, F> Renderable<Ctx, V> for F
where
    F: Fn(&Ctx) -> V,
{
    fn render(&self, ctx: &Ctx) -> V {
        self(ctx)
    }
}

/// Context handed to header renderers
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub column_id: &'a str,
    pub column_index: usize,
    /// Active filter value for this column, if any
    pub filter: Option<&'a FilterValue>,
}

/// Context handed to cell renderers
#[derive(Debug)]
pub struct CellContext<'a, T> {
    pub record: &'a T,
    pub value: CellValue,
    /// Position of the record in the caller's data
    pub row_index: usize,
    pub column_id: &'a str,
}

type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;
type HeaderRenderer<V> = Box<dyn for<'a> Renderable<HeaderContext<'a>, V>>;
type CellRenderer<T, V> = Box<dyn for<'a> Renderable<CellContext<'a, T>, V>>;

/// Column definition for the DataTable
pub struct ColumnDef<T, V = String> {
    id: String,
    accessor: Accessor<T>,
    header: HeaderRenderer<V>,
    cell: CellRenderer<T, V>,
    filter_fn: FilterFn,
}

impl<T: 'static, V: 'static> ColumnDef<T, V> {
    /// Create a new column
    pub fn new(
        id: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
        header: impl Fn(&HeaderContext<'_>) -> V + 'static,
        cell: impl Fn(&CellContext<'_, T>) -> V + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            accessor: Box::new(accessor),
            header: Box::new(header),
            cell: Box::new(cell),
            filter_fn: FilterFn::default(),
        }
    }

    /// Replace the header renderer with any `Renderable`
    pub fn header_renderer(
        mut self,
        renderer: impl for<'a> Renderable<HeaderContext<'a>, V> + 'static,
    ) -> Self {
        self.header = Box::new(renderer);
        self
    }

    /// Replace the cell renderer with any `Renderable`
    pub fn cell_renderer(
        mut self,
        renderer: impl for<'a> Renderable<CellContext<'a, T>, V> + 'static,
    ) -> Self {
        self.cell = Box::new(renderer);
        self
    }

    /// Set the filter strategy used for this column
    pub fn filter_fn(mut self, filter_fn: FilterFn) -> Self {
        self.filter_fn = filter_fn;
        self
    }
}

impl<T: 'static, V: From<String> + 'static> ColumnDef<T, V> {
    /// Create a column rendering a fixed label and the accessor value as text
    pub fn text(
        id: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        let label = label.into();
        Self::new(
            id,
            accessor,
            move |_| V::from(label.clone()),
            |ctx| V::from(ctx.value.to_string()),
        )
    }
}

impl<T, V> ColumnDef<T, V> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn strategy(&self) -> &FilterFn {
        &self.filter_fn
    }

    /// Read this column's value from a record
    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    /// Render the header
    pub fn render_header(&self, ctx: &HeaderContext<'_>) -> V {
        self.header.render(ctx)
    }

    /// Render a cell
    pub fn render_cell(&self, ctx: &CellContext<'_, T>) -> V {
        self.cell.render(ctx)
    }
}

impl<T, V> fmt::Debug for ColumnDef<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("filter_fn", &self.filter_fn)
            .finish_non_exhaustive()
    }
}

/// Ordered column schema with an identifier index
pub struct Columns<T, V = String> {
    defs: Vec<ColumnDef<T, V>>,
    positions: AHashMap<String, usize>,
}

impl<T, V> Columns<T, V> {
    /// Build the schema, rejecting duplicate column identifiers
    pub fn new(defs: Vec<ColumnDef<T, V>>) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            if positions.insert(def.id.clone(), index).is_some() {
                return Err(Error::DuplicateColumn {
                    id: def.id.clone(),
                });
            }
        }
        Ok(Self { defs, positions })
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef<T, V>> {
        self.positions.get(id).map(|&index| &self.defs[index])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef<T, V>> {
        self.defs.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(ColumnDef::id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<T, V> fmt::Debug for Columns<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.defs.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Device {
        name: String,
        power: f64,
    }

    fn device(name: &str, power: f64) -> Device {
        Device {
            name: name.to_string(),
            power,
        }
    }

    #[test]
    fn text_column_renders_label_and_value() {
        let col: ColumnDef<Device> = ColumnDef::text("name", "Name", |d: &Device| (&d.name).into());
        let record = device("WTG-01", 1.5);

        let header = col.render_header(&HeaderContext {
            column_id: col.id(),
            column_index: 0,
            filter: None,
        });
        assert_eq!(header, "Name");

        let cell = col.render_cell(&CellContext {
            record: &record,
            value: col.value(&record),
            row_index: 0,
            column_id: col.id(),
        });
        assert_eq!(cell, "WTG-01");
    }

    #[test]
    fn custom_cell_renderer_sees_record() {
        let col: ColumnDef<Device> = ColumnDef::new(
            "power",
            |d: &Device| d.power.into(),
            |_| "Power".to_string(),
            |ctx| format!("{:.1} MW", ctx.record.power),
        );
        let record = device("WTG-02", 2.5);
        let cell = col.render_cell(&CellContext {
            record: &record,
            value: col.value(&record),
            row_index: 3,
            column_id: "power",
        });
        assert_eq!(cell, "2.5 MW");
    }

    struct Upper;

    impl<'a> Renderable<HeaderContext<'a>, String> for Upper {
        fn render(&self, ctx: &HeaderContext<'a>) -> String {
            ctx.column_id.to_uppercase()
        }
    }

    #[test]
    fn header_renderer_accepts_trait_impl() {
        let col: ColumnDef<Device> =
            ColumnDef::text("name", "Name", |d: &Device| (&d.name).into()).header_renderer(Upper);
        let header = col.render_header(&HeaderContext {
            column_id: "name",
            column_index: 0,
            filter: None,
        });
        assert_eq!(header, "NAME");
    }

    #[test]
    fn duplicate_column_ids_are_rejected() {
        let result = Columns::new(vec![
            ColumnDef::<Device>::text("name", "Name", |d: &Device| (&d.name).into()),
            ColumnDef::<Device>::text("name", "Again", |d: &Device| (&d.name).into()),
        ]);
        assert!(matches!(result, Err(Error::DuplicateColumn { id }) if id == "name"));
    }

    #[test]
    fn columns_keep_schema_order() {
        let columns = Columns::new(vec![
            ColumnDef::<Device>::text("name", "Name", |d: &Device| (&d.name).into()),
            ColumnDef::<Device>::text("power", "Power", |d: &Device| d.power.into()),
        ])
        .expect("unique ids");

        assert_eq!(columns.ids().collect::<Vec<_>>(), vec!["name", "power"]);
        assert_eq!(columns.position("power"), Some(1));
        assert!(columns.get("missing").is_none());
    }

    #[test]
    fn cell_value_display() {
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from(None::<i64>).to_string(), "");
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
    }
}
