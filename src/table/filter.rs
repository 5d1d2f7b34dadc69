//! Search and type filtering (pure).

use super::row::TableRow;

/// Free-text search plus optional exact type match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterInput {
    /// Case-insensitive substring searched across every field value.
    pub search: String,
    /// Exact match against the reserved `type` field.
    pub type_filter: Option<String>,
}

impl FilterInput {
    /// Filter input from search text and an optional type.
    pub fn new(search: impl Into<String>, type_filter: Option<String>) -> Self {
        Self {
            search: search.into(),
            type_filter,
        }
    }

    /// True when neither filter is set and filtering is the identity.
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.type_filter.is_none()
    }

    /// Whether a single row passes both filters.
    pub fn matches<T: TableRow>(&self, row: &T) -> bool {
        if let Some(wanted) = &self.type_filter {
            if row.type_tag().as_deref() != Some(wanted.as_str()) {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        row.fields()
            .iter()
            .any(|(_, value)| value.contains_lowercase(&needle))
    }
}

/// Positions of the rows that pass `input`, in original order.
pub fn filter_indices<T: TableRow>(rows: &[T], input: &FilterInput) -> Vec<usize> {
    if input.is_identity() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| input.matches(*row))
        .map(|(i, _)| i)
        .collect()
}

/// Filter rows by reference.
pub fn filter_rows<'a, T: TableRow>(rows: &'a [T], input: &FilterInput) -> Vec<&'a T> {
    filter_indices(rows, input)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

/// Distinct `type` values in first-seen order, used to cycle the type filter.
pub fn distinct_types<T: TableRow>(rows: &[T]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for tag in rows.iter().filter_map(|row| row.type_tag()) {
        if !types.contains(&tag) {
            types.push(tag);
        }
    }
    types
}
