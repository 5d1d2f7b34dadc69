//! Row abstraction the table is generic over.

use super::value::CellValue;

/// Reserved field name used by the type filter.
pub const TYPE_FIELD: &str = "type";

/// A record the data table can display.
///
/// The table never assumes a fixed shape: it only needs the top-level
/// fields (for free-text search), dotted-path lookup (for path accessors),
/// and the reserved `type` field (for the type filter).
pub trait TableRow {
    /// Top-level fields in display order.
    fn fields(&self) -> Vec<(String, CellValue)>;

    /// Resolve a dotted field path such as `metrics.clicks`.
    ///
    /// Any missing segment yields `CellValue::Empty`.
    fn lookup(&self, path: &str) -> CellValue {
        lookup_in_fields(self.fields(), path)
    }

    /// Value of the reserved `type` field, if it is text.
    fn type_tag(&self) -> Option<String> {
        match self.lookup(TYPE_FIELD) {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Resolve a dotted path against a row's top-level fields.
pub fn lookup_in_fields(fields: Vec<(String, CellValue)>, path: &str) -> CellValue {
    let mut segments = path.split('.');
    let Some(head) = segments.next() else {
        return CellValue::Empty;
    };
    let mut current = match fields.into_iter().find(|(name, _)| name == head) {
        Some((_, value)) => value,
        None => return CellValue::Empty,
    };
    for segment in segments {
        current = match current.get(segment) {
            Some(next) => next.clone(),
            None => return CellValue::Empty,
        };
    }
    current
}

impl TableRow for serde_json::Value {
    fn fields(&self) -> Vec<(String, CellValue)> {
        match self {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), CellValue::from(v)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn lookup(&self, path: &str) -> CellValue {
        let mut current = self;
        for segment in path.split('.') {
            current = match current.get(segment) {
                Some(next) => next,
                None => return CellValue::Empty,
            };
        }
        CellValue::from(current)
    }

    fn type_tag(&self) -> Option<String> {
        self.get(TYPE_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}
