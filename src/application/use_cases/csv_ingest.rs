// ============================================================
// CSV INGEST USE CASE
// ============================================================
// Validate, store, and parse uploaded CSV files

use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::ingest_config::IngestMode;
use crate::domain::stored_file::{
    FileListing, StoredFileName, TableContents, UploadOutcome, UploadSummary,
    FILE_NOT_FOUND_MESSAGE,
};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::storage::UploadStore;

/// Upload, list, and read over a single upload directory
pub struct CsvIngestUseCase {
    store: UploadStore,
    parser: CsvParser,
    mode: IngestMode,
}

impl CsvIngestUseCase {
    pub fn new(store: UploadStore, mode: IngestMode) -> Self {
        Self {
            store,
            parser: CsvParser::new(),
            mode,
        }
    }

    pub fn mode(&self) -> IngestMode {
        self.mode
    }

    pub fn upload(&self, filename: &str, bytes: &[u8]) -> Result<UploadOutcome> {
        let name = StoredFileName::for_upload(filename).map_err(|err| {
            warn!(filename = %filename, "Rejected upload with invalid file name");
            err
        })?;

        match self.mode {
            IngestMode::Persist => {
                let path = self.store.write(&name, bytes)?;
                let table = self.parser.parse_file(&path)?;
                info!(
                    filename = %name,
                    bytes = bytes.len(),
                    rows = table.row_count(),
                    "Stored CSV upload"
                );
                Ok(UploadOutcome::Stored(UploadSummary {
                    filename: name.into_string(),
                    rows: table.row_count(),
                    columns: table.columns,
                }))
            }
            IngestMode::Echo => {
                let table = self.parser.parse_bytes(bytes)?;
                info!(
                    filename = %name,
                    bytes = bytes.len(),
                    rows = table.row_count(),
                    "Parsed CSV upload without storing"
                );
                Ok(UploadOutcome::Echoed(TableContents {
                    filename: name.into_string(),
                    rows: table.row_count(),
                    data: table.into_records(),
                }))
            }
        }
    }

    pub fn list(&self) -> Result<FileListing> {
        let files = self.store.list()?;
        Ok(FileListing { files })
    }

    pub fn read(&self, filename: &str) -> Result<TableContents> {
        let name = StoredFileName::for_lookup(filename).map_err(|err| {
            warn!(filename = %filename, "Rejected read with invalid file name");
            err
        })?;

        if !self.store.contains(&name) {
            return Err(AppError::NotFound(FILE_NOT_FOUND_MESSAGE.to_string()));
        }

        let table = self.parser.parse_file(&self.store.path_of(&name))?;
        info!(filename = %name, rows = table.row_count(), "Read stored CSV");
        Ok(TableContents {
            filename: name.into_string(),
            rows: table.row_count(),
            data: table.into_records(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::CellValue;
    use crate::domain::stored_file::INVALID_CSV_MESSAGE;
    use tempfile::TempDir;

    const PEOPLE: &[u8] = b"name,age\nAna,30\nBruno,25\n";

    fn use_case(mode: IngestMode) -> (TempDir, CsvIngestUseCase) {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::open(tmp.path().join("uploads")).unwrap();
        (tmp, CsvIngestUseCase::new(store, mode))
    }

    #[test]
    fn test_persist_upload_summarizes() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        let outcome = use_case.upload("people.csv", PEOPLE).unwrap();

        match outcome {
            UploadOutcome::Stored(summary) => {
                assert_eq!(summary.filename, "people.csv");
                assert_eq!(summary.rows, 2);
                assert_eq!(summary.columns, vec!["name", "age"]);
            }
            other => panic!("expected stored outcome, got {:?}", other),
        }
        assert_eq!(use_case.list().unwrap().files, vec!["people.csv"]);
    }

    #[test]
    fn test_echo_upload_stores_nothing() {
        let (_tmp, use_case) = use_case(IngestMode::Echo);
        let outcome = use_case.upload("people.csv", PEOPLE).unwrap();

        match outcome {
            UploadOutcome::Echoed(contents) => {
                assert_eq!(contents.rows, 2);
                assert_eq!(
                    contents.data[1].get("name"),
                    Some(&CellValue::Text("Bruno".to_string()))
                );
            }
            other => panic!("expected echoed outcome, got {:?}", other),
        }
        assert!(use_case.list().unwrap().files.is_empty());
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        for filename in ["report.txt", "csv", "", "../escape.csv"] {
            let err = use_case.upload(filename, PEOPLE).unwrap_err();
            assert_eq!(err.message(), INVALID_CSV_MESSAGE);
        }
        assert!(use_case.list().unwrap().files.is_empty());
    }

    #[test]
    fn test_round_trip_read() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        use_case.upload("people.csv", PEOPLE).unwrap();

        let contents = use_case.read("people.csv").unwrap();
        assert_eq!(contents.rows, 2);
        for record in &contents.data {
            assert_eq!(record.columns().collect::<Vec<_>>(), vec!["name", "age"]);
        }
    }

    #[test]
    fn test_reupload_replaces_content() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        use_case.upload("people.csv", PEOPLE).unwrap();
        use_case.upload("people.csv", b"city\nLisboa\n").unwrap();

        let contents = use_case.read("people.csv").unwrap();
        assert_eq!(contents.rows, 1);
        assert_eq!(
            contents.data[0].get("city"),
            Some(&CellValue::Text("Lisboa".to_string()))
        );
        assert_eq!(contents.data[0].get("name"), None);
    }

    #[test]
    fn test_read_missing_file() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        let err = use_case.read("ghost.csv").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == FILE_NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_read_rejects_traversal() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        let err = use_case.read("../secret.csv").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_malformed_csv_is_fault() {
        let (_tmp, use_case) = use_case(IngestMode::Persist);
        let err = use_case.upload("bad.csv", b"a,b\n1,2,3\n").unwrap_err();
        assert!(!err.is_expected());
    }
}
