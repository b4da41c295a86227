pub mod use_cases;

pub use use_cases::csv_ingest::CsvIngestUseCase;
