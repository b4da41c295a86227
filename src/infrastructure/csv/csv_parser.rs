// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV bytes into a typed table with header naming rules

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::WINDOWS_1252;

use crate::domain::csv::{CellValue, ColumnKind, ParsedTable, Record};
use crate::domain::error::AppError;

/// CSV parser with encoding fallback and per-column type inference
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSV file from disk
    pub fn parse_file(&self, path: &Path) -> Result<ParsedTable, AppError> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.parse_bytes(&bytes)
    }

    /// Parse raw CSV bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedTable, AppError> {
        let content = decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<ParsedTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // Short rows are padded, long rows rejected below
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = loop {
            match records.next() {
                Some(result) => {
                    let record = result.map_err(|e| {
                        AppError::ParseError(format!("Failed to read CSV headers: {}", e))
                    })?;
                    if !is_blank(content, &record) {
                        break record;
                    }
                }
                None => {
                    return Err(AppError::ParseError(
                        "No columns to parse from file".to_string(),
                    ))
                }
            }
        };
        let columns = column_names(&header);

        let mut raw_rows: Vec<StringRecord> = Vec::new();
        for result in records {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", raw_rows.len() + 1, e))
            })?;
            if is_blank(content, &record) {
                continue;
            }
            if record.len() > columns.len() {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(AppError::ParseError(format!(
                    "Expected {} fields in line {}, saw {}",
                    columns.len(),
                    line,
                    record.len()
                )));
            }
            raw_rows.push(record);
        }

        let kinds: Vec<ColumnKind> = (0..columns.len())
            .map(|idx| ColumnKind::infer(raw_rows.iter().map(|row| row.get(idx))))
            .collect();

        let records = raw_rows
            .iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .zip(&kinds)
                    .enumerate()
                    .map(|(idx, (name, kind))| {
                        (name.clone(), CellValue::from_raw(row.get(idx), *kind))
                    })
                    .collect();
                Record::new(cells)
            })
            .collect();

        Ok(ParsedTable { columns, records })
    }
}

/// Decode as UTF-8, falling back to Windows-1252 for legacy exports
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(content) => content.strip_prefix('\u{feff}').unwrap_or(content).to_string(),
        Err(_) => {
            let (content, _, _) = WINDOWS_1252.decode(bytes);
            content.into_owned()
        }
    }
}

/// Whitespace-only lines count as blank, like empty ones. A quoted empty
/// field (`""`) is a real row and is kept.
fn is_blank(content: &str, record: &StringRecord) -> bool {
    let empty_field =
        record.len() == 1 && record.get(0).map(|v| v.trim().is_empty()).unwrap_or(true);
    if !empty_field {
        return false;
    }

    let start = record.position().map(|p| p.byte() as usize).unwrap_or(0);
    let line = content
        .get(start..)
        .unwrap_or("")
        .trim_start_matches(['\r', '\n'])
        .lines()
        .next()
        .unwrap_or("");
    !line.contains('"')
}

/// Name empty headers `Unnamed: i` and suffix duplicates with `.1`, `.2`, ...
fn column_names(header: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(header.len());

    for (idx, raw) in header.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}
