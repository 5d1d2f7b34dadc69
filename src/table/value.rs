//! Cell values extracted from rows.
//!
//! A `CellValue` is what a column accessor produces. It carries enough type
//! information to sort numbers numerically and to write numeric spreadsheet
//! cells, and it stringifies the way the report pages expect (`100`, `2.5`,
//! empty string for missing values).

use std::cmp::Ordering;
use std::fmt;

/// A single value pulled out of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null value.
    Empty,
    /// Text value.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Nested mapping of field name to value, in field order.
    Map(Vec<(String, CellValue)>),
}

impl CellValue {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Wrap an optional value, mapping `None` to `Empty`.
    pub fn from_option<V: Into<CellValue>>(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }

    /// True for `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for integers and floats.
    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Look up a field of a nested map.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        match self {
            CellValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this value, or any leaf value nested under it, contains
    /// `needle_lower` when lowercased. `needle_lower` must already be lowercase.
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Map(entries) => entries
                .iter()
                .any(|(_, v)| v.contains_lowercase(needle_lower)),
            other => other.to_string().to_lowercase().contains(needle_lower),
        }
    }

    /// Total ordering used by the table sorter.
    ///
    /// Numbers before text, empty last. Text compares case-insensitively with
    /// natural ordering of digit runs ("Campaign 2" < "Campaign 10").
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Greater,
            (_, CellValue::Empty) => Ordering::Less,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => natural_cmp(&self.to_string(), &other.to_string()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Map(entries) => {
                let mut first = true;
                for (_, value) in entries {
                    if value.is_empty() {
                        continue;
                    }
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{value}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<u64> for CellValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(CellValue::Integer)
            .unwrap_or(CellValue::Float(i as f64))
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    CellValue::from(u)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(items) => CellValue::Map(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), CellValue::from(v)))
                    .collect(),
            ),
            Value::Object(map) => CellValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), CellValue::from(v)))
                    .collect(),
            ),
        }
    }
}

// ===== Natural ordering =====

/// Case-insensitive comparison that orders embedded digit runs numerically.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut left = Chunks::new(&a);
    let mut right = Chunks::new(&b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(dx), Chunk::Digits(dy)) => cmp_digit_runs(dx, dy),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(tx), Chunk::Text(ty)) => tx.cmp(ty),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_display_without_trailing_zero() {
        assert_eq!(CellValue::Float(100.0).to_string(), "100");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Integer(42).to_string(), "42");
    }

    #[test]
    fn empty_displays_as_empty_string() {
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn numbers_sort_numerically() {
        let a = CellValue::Integer(9);
        let b = CellValue::Float(10.5);
        assert_eq!(a.sort_cmp(&b), Ordering::Less);
    }

    #[test]
    fn empty_sorts_after_values() {
        assert_eq!(
            CellValue::Empty.sort_cmp(&CellValue::text("a")),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Integer(1).sort_cmp(&CellValue::Empty),
            Ordering::Less
        );
    }

    #[test]
    fn natural_ordering_of_digit_runs() {
        assert_eq!(natural_cmp("Campaign 2", "Campaign 10"), Ordering::Less);
        assert_eq!(natural_cmp("campaign b", "Campaign A"), Ordering::Greater);
        assert_eq!(natural_cmp("abc", "ABC"), Ordering::Equal);
    }

    #[test]
    fn nested_map_search_looks_at_leaves_only() {
        let value = CellValue::Map(vec![
            ("impressions".to_string(), CellValue::Integer(1200)),
            ("clicks".to_string(), CellValue::Integer(87)),
        ]);
        assert!(value.contains_lowercase("87"));
        assert!(!value.contains_lowercase("clicks"));
    }

    #[test]
    fn json_values_convert() {
        let json = serde_json::json!({"a": 1, "b": "x", "c": null});
        let value = CellValue::from(&json);
        assert_eq!(value.get("a"), Some(&CellValue::Integer(1)));
        assert_eq!(value.get("b"), Some(&CellValue::text("x")));
        assert_eq!(value.get("c"), Some(&CellValue::Empty));
    }
}
