// ============================================================
// CELL VALUES
// ============================================================
// Typed cell values produced by column type inference

use serde::Serialize;

/// Markers the tabular parser treats as a missing value.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred type of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every cell is missing
    Empty,
    Integer,
    Boolean,
    Float,
    Text,
}

/// A single cell, serialized as the bare JSON value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    /// Whole numbers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    pub fn is_missing(raw: &str) -> bool {
        MISSING_MARKERS.contains(&raw)
    }

    /// Convert a raw cell according to its column's kind.
    ///
    /// The kind must come from `ColumnKind::infer` over the same column, so a
    /// non-missing cell always converts; anything else degrades to text.
    pub fn from_raw(raw: Option<&str>, kind: ColumnKind) -> Self {
        let raw = match raw {
            Some(raw) if !Self::is_missing(raw) => raw,
            _ => return CellValue::Null,
        };

        match kind {
            ColumnKind::Empty => CellValue::Null,
            ColumnKind::Integer => parse_integer(raw)
                .unwrap_or_else(|| CellValue::Text(raw.to_string())),
            ColumnKind::Boolean => parse_boolean(raw)
                .map(CellValue::Boolean)
                .unwrap_or_else(|| CellValue::Text(raw.to_string())),
            ColumnKind::Float => parse_float(raw)
                .map(CellValue::Float)
                .unwrap_or_else(|| CellValue::Text(raw.to_string())),
            ColumnKind::Text => CellValue::Text(raw.to_string()),
        }
    }
}

impl ColumnKind {
    /// Infer a column type from its raw cells (`None` for padded cells).
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let present: Vec<&str> = cells
            .into_iter()
            .flatten()
            .filter(|raw| !CellValue::is_missing(raw))
            .collect();

        if present.is_empty() {
            ColumnKind::Empty
        } else if present.iter().all(|raw| parse_integer(raw).is_some()) {
            ColumnKind::Integer
        } else if present.iter().all(|raw| parse_boolean(raw).is_some()) {
            ColumnKind::Boolean
        } else if present.iter().all(|raw| parse_float(raw).is_some()) {
            ColumnKind::Float
        } else {
            ColumnKind::Text
        }
    }
}

fn parse_integer(raw: &str) -> Option<CellValue> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(CellValue::Integer)
        .or_else(|_| trimmed.parse::<u64>().map(CellValue::Unsigned))
        .ok()
}

fn parse_boolean(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer_column() {
        let kind = ColumnKind::infer(vec![Some("30"), Some(" 25"), Some("")]);
        assert_eq!(kind, ColumnKind::Integer);
        assert_eq!(CellValue::from_raw(Some(" 25"), kind), CellValue::Integer(25));
        assert_eq!(CellValue::from_raw(Some(""), kind), CellValue::Null);
    }

    #[test]
    fn test_integers_beyond_i64_stay_exact() {
        let kind = ColumnKind::infer(vec![Some("18446744073709551615"), Some("-1")]);
        assert_eq!(kind, ColumnKind::Integer);
        assert_eq!(
            CellValue::from_raw(Some("18446744073709551615"), kind),
            CellValue::Unsigned(u64::MAX)
        );
        assert_eq!(CellValue::from_raw(Some("-1"), kind), CellValue::Integer(-1));

        let json = serde_json::to_string(&CellValue::Unsigned(u64::MAX)).unwrap();
        assert_eq!(json, "18446744073709551615");
    }

    #[test]
    fn test_integers_widen_to_float() {
        let kind = ColumnKind::infer(vec![Some("1"), Some("2.5")]);
        assert_eq!(kind, ColumnKind::Float);
        assert_eq!(CellValue::from_raw(Some("1"), kind), CellValue::Float(1.0));
    }

    #[test]
    fn test_infer_boolean_column() {
        let kind = ColumnKind::infer(vec![Some("True"), Some("false"), Some("NA")]);
        assert_eq!(kind, ColumnKind::Boolean);
        assert_eq!(CellValue::from_raw(Some("True"), kind), CellValue::Boolean(true));
        assert_eq!(CellValue::from_raw(Some("NA"), kind), CellValue::Null);
    }

    #[test]
    fn test_mixed_column_is_text() {
        let kind = ColumnKind::infer(vec![Some("1"), Some("certo")]);
        assert_eq!(kind, ColumnKind::Text);
        assert_eq!(
            CellValue::from_raw(Some("1"), kind),
            CellValue::Text("1".to_string())
        );
    }

    #[test]
    fn test_all_missing_column() {
        let kind = ColumnKind::infer(vec![Some(""), None, Some("null")]);
        assert_eq!(kind, ColumnKind::Empty);
        assert_eq!(CellValue::from_raw(Some("x"), kind), CellValue::Null);
    }

    #[test]
    fn test_cell_serialization() {
        let values = vec![
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::Float(1.5),
            CellValue::Boolean(false),
            CellValue::Text("Ana".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,3,1.5,false,"Ana"]"#);
    }
}
