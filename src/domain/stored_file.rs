use serde::Serialize;
use std::fmt;

use crate::domain::csv::Record;
use crate::domain::error::{AppError, Result};

pub const INVALID_CSV_MESSAGE: &str = "Por favor, envie um arquivo CSV válido.";
pub const FILE_NOT_FOUND_MESSAGE: &str = "Arquivo não encontrado";

const CSV_SUFFIX: &str = ".csv";

/// Name of a file directly under the upload directory.
///
/// Always a single path component, so joining it onto the upload directory
/// can never escape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFileName(String);

impl StoredFileName {
    /// Accept a name for upload: single path component ending in `.csv`
    /// (case-sensitive suffix test, nothing more).
    pub fn for_upload(name: &str) -> Result<Self> {
        if !name.ends_with(CSV_SUFFIX) {
            return Err(AppError::ValidationError(INVALID_CSV_MESSAGE.to_string()));
        }
        Self::for_lookup(name)
    }

    /// Accept any single path component for lookup, with no suffix rule.
    pub fn for_lookup(name: &str) -> Result<Self> {
        if !is_single_component(name) {
            return Err(AppError::ValidationError(INVALID_CSV_MESSAGE.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_single_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Result of an upload that stored the file
#[derive(Debug, Serialize, Clone)]
pub struct UploadSummary {
    pub filename: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Parsed records of a file, returned by read and by echo uploads
#[derive(Debug, Serialize, Clone)]
pub struct TableContents {
    pub filename: String,
    pub rows: usize,
    pub data: Vec<Record>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum UploadOutcome {
    Stored(UploadSummary),
    Echoed(TableContents),
}

#[derive(Debug, Serialize, Clone)]
pub struct FileListing {
    pub files: Vec<String>,
}
