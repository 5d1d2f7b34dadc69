//! Sort state and stable multi-key sorting (pure).

use super::column::Columns;
use super::row::TableRow;
use super::value::CellValue;
use std::cmp::Ordering;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first, missing values last.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator glyph.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// One `(column, direction)` sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Column the key sorts by.
    pub column_id: String,
    /// Direction of the key.
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending key on `column_id`.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending key on `column_id`.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered sort keys; later keys only break ties of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Sort by `keys`, first key most significant.
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Sort by a single key.
    pub fn single(key: SortKey) -> Self {
        Self { keys: vec![key] }
    }

    /// Keys, most significant first.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// True when rows keep their filtered order.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Direction of `column_id` if it is part of the sort.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|k| k.column_id == column_id)
            .map(|k| k.direction)
    }

    /// Header-click toggle for a single-column sort.
    ///
    /// Cycles unsorted → `first` → reversed → unsorted, replacing any
    /// other active key.
    pub fn toggle(&self, column_id: &str, first: SortDirection) -> SortState {
        match self.direction_of(column_id) {
            None => SortState::single(SortKey {
                column_id: column_id.to_string(),
                direction: first,
            }),
            Some(current) if current == first => SortState::single(SortKey {
                column_id: column_id.to_string(),
                direction: first.reversed(),
            }),
            Some(_) => SortState::default(),
        }
    }
}

/// First direction a header click applies: descending for numeric columns,
/// ascending otherwise. Decided by the first non-empty value in the column.
pub fn first_sort_direction<T: TableRow>(
    rows: &[T],
    columns: &Columns<T>,
    column_id: &str,
) -> SortDirection {
    let Some(column) = columns.find(column_id) else {
        return SortDirection::Ascending;
    };
    let numeric = rows
        .iter()
        .map(|row| column.value(row))
        .find(|v| !v.is_empty())
        .is_some_and(|v| v.is_number());
    if numeric {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}

/// Stable sort of row positions by `sort`.
///
/// Keys naming unknown or unsortable columns are skipped. With no usable
/// keys the input order is kept.
pub fn sort_indices<T: TableRow>(
    rows: &[T],
    indices: &mut [usize],
    columns: &Columns<T>,
    sort: &SortState,
) {
    let keys: Vec<_> = sort
        .keys()
        .iter()
        .filter_map(|key| {
            columns
                .find(&key.column_id)
                .filter(|c| c.is_sortable())
                .map(|c| (c, key.direction))
        })
        .collect();
    if keys.is_empty() {
        return;
    }

    // Extract each key once per row instead of once per comparison.
    let mut decorated: Vec<(usize, Vec<CellValue>)> = indices
        .iter()
        .map(|&i| (i, keys.iter().map(|(c, _)| c.value(&rows[i])).collect()))
        .collect();

    decorated.sort_by(|(_, a), (_, b)| {
        for (pos, (_, direction)) in keys.iter().enumerate() {
            let ord = a[pos].sort_cmp(&b[pos]);
            let ord = match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    for (slot, (i, _)) in indices.iter_mut().zip(decorated) {
        *slot = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::ColumnDef;
    use serde_json::{json, Value};

    fn columns() -> Columns<Value> {
        Columns::new(vec![
            ColumnDef::path("name", "Name", "name"),
            ColumnDef::path("spend", "Spend", "spend"),
            ColumnDef::path("type", "Type", "type"),
            ColumnDef::path("note", "Note", "note").unsortable(),
        ])
        .unwrap()
    }

    fn names(rows: &[Value], indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| rows[i]["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn ascending_by_number() {
        let rows = vec![json!({"name": "A", "spend": 100}), json!({"name": "B", "spend": 50})];
        let mut idx = vec![0, 1];
        sort_indices(&rows, &mut idx, &columns(), &SortState::single(SortKey::asc("spend")));
        assert_eq!(names(&rows, &idx), vec!["B", "A"]);
    }

    #[test]
    fn no_sort_keeps_order() {
        let rows = vec![json!({"name": "B"}), json!({"name": "A"})];
        let mut idx = vec![0, 1];
        sort_indices(&rows, &mut idx, &columns(), &SortState::default());
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn unsortable_column_is_ignored() {
        let rows = vec![json!({"name": "B", "note": "a"}), json!({"name": "A", "note": "b"})];
        let mut idx = vec![0, 1];
        sort_indices(&rows, &mut idx, &columns(), &SortState::single(SortKey::desc("note")));
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn secondary_key_breaks_ties_only() {
        let rows = vec![
            json!({"name": "c", "type": "Paid"}),
            json!({"name": "a", "type": "Owned"}),
            json!({"name": "b", "type": "Paid"}),
        ];
        let mut idx = vec![0, 1, 2];
        let sort = SortState::new(vec![SortKey::desc("type"), SortKey::asc("name")]);
        sort_indices(&rows, &mut idx, &columns(), &sort);
        assert_eq!(names(&rows, &idx), vec!["b", "c", "a"]);
    }

    #[test]
    fn equal_keys_keep_relative_order() {
        let rows = vec![
            json!({"name": "first", "spend": 1}),
            json!({"name": "second", "spend": 1}),
            json!({"name": "third", "spend": 0}),
        ];
        let mut idx = vec![0, 1, 2];
        sort_indices(&rows, &mut idx, &columns(), &SortState::single(SortKey::desc("spend")));
        assert_eq!(names(&rows, &idx), vec!["first", "second", "third"]);
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let s0 = SortState::default();
        let s1 = s0.toggle("name", SortDirection::Ascending);
        assert_eq!(s1.direction_of("name"), Some(SortDirection::Ascending));
        let s2 = s1.toggle("name", SortDirection::Ascending);
        assert_eq!(s2.direction_of("name"), Some(SortDirection::Descending));
        let s3 = s2.toggle("name", SortDirection::Ascending);
        assert!(s3.is_empty());
    }

    #[test]
    fn toggle_replaces_other_column() {
        let s = SortState::single(SortKey::asc("name")).toggle("spend", SortDirection::Descending);
        assert_eq!(s.keys(), &[SortKey::desc("spend")]);
    }

    #[test]
    fn numeric_columns_sort_descending_first() {
        let rows = vec![json!({"name": "A", "spend": 10})];
        assert_eq!(
            first_sort_direction(&rows, &columns(), "spend"),
            SortDirection::Descending
        );
        assert_eq!(
            first_sort_direction(&rows, &columns(), "name"),
            SortDirection::Ascending
        );
    }
}
