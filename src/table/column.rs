//! Column definitions.

use super::error::TableError;
use super::row::TableRow;
use super::value::CellValue;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type AccessorFn<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a column pulls its value out of a row.
pub enum Accessor<T> {
    /// Dotted field path (`metrics.clicks`).
    Path(String),
    /// Derivation function.
    Fn(AccessorFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Path(p) => Accessor::Path(p.clone()),
            Accessor::Fn(f) => Accessor::Fn(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Accessor::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Describes one table column.
pub struct ColumnDef<T> {
    id: String,
    header: String,
    accessor: Accessor<T>,
    width: Option<u16>,
    cell: Option<CellFn<T>>,
    centered: bool,
    sortable: bool,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            width: self.width,
            cell: self.cell.clone(),
            centered: self.centered,
            sortable: self.sortable,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("custom_cell", &self.cell.is_some())
            .field("centered", &self.centered)
            .field("sortable", &self.sortable)
            .finish()
    }
}

impl<T: TableRow> ColumnDef<T> {
    /// Column reading a dotted field path.
    pub fn path(id: impl Into<String>, header: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_accessor(id, header, Accessor::Path(path.into()))
    }

    /// Column whose value is derived from the row.
    pub fn derived<F>(id: impl Into<String>, header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::with_accessor(id, header, Accessor::Fn(Arc::new(f)))
    }

    fn with_accessor(id: impl Into<String>, header: impl Into<String>, accessor: Accessor<T>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor,
            width: None,
            cell: None,
            centered: false,
            sortable: true,
        }
    }

    /// Fixed column width in terminal cells.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Custom display renderer. Does not affect sorting or export.
    pub fn cell<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(f));
        self
    }

    /// Center the cell contents.
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Ignore header sort toggles for this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Unique column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Fixed width in cells, if set.
    pub fn fixed_width(&self) -> Option<u16> {
        self.width
    }

    /// Whether cells are centered.
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Whether the header toggles sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Accessor value: the derivation function wins over the field path.
    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Accessor::Fn(f) => f(row),
            Accessor::Path(path) => row.lookup(path),
        }
    }

    /// Display text for a cell.
    pub fn render(&self, row: &T) -> String {
        match &self.cell {
            Some(cell) => cell(row),
            None => self.value(row).to_string(),
        }
    }
}

/// Ordered column set with unique identifiers.
pub struct Columns<T> {
    defs: Vec<ColumnDef<T>>,
}

impl<T> Clone for Columns<T> {
    fn clone(&self) -> Self {
        Self {
            defs: self.defs.clone(),
        }
    }
}

impl<T> fmt::Debug for Columns<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.defs.iter()).finish()
    }
}

impl<T: TableRow> Columns<T> {
    /// Validate that every column id is unique.
    pub fn new(defs: Vec<ColumnDef<T>>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for def in &defs {
            if !seen.insert(def.id.as_str()) {
                return Err(TableError::DuplicateColumn(def.id.clone()));
            }
        }
        Ok(Self { defs })
    }

    /// Definitions in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDef<T>> {
        self.defs.iter()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Column at a display position.
    pub fn get(&self, index: usize) -> Option<&ColumnDef<T>> {
        self.defs.get(index)
    }

    /// Column with the given id.
    pub fn find(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.defs.iter().find(|c| c.id == id)
    }

    /// Display position of the column with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.defs.iter().position(|c| c.id == id)
    }

    /// Header labels in display order.
    pub fn headers(&self) -> Vec<&str> {
        self.defs.iter().map(|c| c.header.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn accessor_fn_takes_precedence_over_path() {
        let col: ColumnDef<Value> =
            ColumnDef::derived("double", "Double", |row: &Value| {
                CellValue::from(row["n"].as_i64().unwrap_or(0) * 2)
            });
        assert_eq!(col.value(&json!({"n": 4})), CellValue::Integer(8));
    }

    #[test]
    fn path_accessor_reads_nested_field() {
        let col: ColumnDef<Value> = ColumnDef::path("clicks", "Clicks", "metrics.clicks");
        assert_eq!(
            col.value(&json!({"metrics": {"clicks": 3}})),
            CellValue::Integer(3)
        );
        assert_eq!(col.render(&json!({})), "");
    }

    #[test]
    fn custom_cell_only_changes_display() {
        let col: ColumnDef<Value> =
            ColumnDef::path("spend", "Spend", "spend").cell(|row: &Value| format!("${}", row["spend"]));
        let row = json!({"spend": 5});
        assert_eq!(col.render(&row), "$5");
        assert_eq!(col.value(&row), CellValue::Integer(5));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Columns::<Value>::new(vec![
            ColumnDef::path("a", "A", "a"),
            ColumnDef::path("a", "Again", "b"),
        ]);
        assert_eq!(result.unwrap_err(), TableError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn columns_lookup_by_id() {
        let cols = Columns::<Value>::new(vec![
            ColumnDef::path("a", "A", "a").width(12).centered(),
            ColumnDef::path("b", "B", "b").unsortable(),
        ])
        .unwrap();
        assert_eq!(cols.position("b"), Some(1));
        assert_eq!(cols.find("a").and_then(|c| c.fixed_width()), Some(12));
        assert!(cols.find("a").is_some_and(|c| c.is_centered()));
        assert!(!cols.find("b").is_some_and(|c| c.is_sortable()));
        assert_eq!(cols.headers(), vec!["A", "B"]);
    }
}
