// ============================================================
// PARSED TABLE
// ============================================================
// In-memory column/record view of a CSV document

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::CellValue;

/// One data row. Serializes as a JSON object with keys in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    cells: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }
}

#[cfg(test)]
impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Header plus records, recomputed from the stored bytes on every read
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl ParsedTable {
    /// Number of data rows, header excluded
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
