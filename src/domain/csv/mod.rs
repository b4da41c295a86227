// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types for parsed CSV content
// No I/O, no async

mod cell_value;
mod parsed_table;

pub use cell_value::{CellValue, ColumnKind, MISSING_MARKERS};
pub use parsed_table::{ParsedTable, Record};
