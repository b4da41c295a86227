pub mod error;
pub mod ingest_config;
pub mod stored_file;

// CSV table model
pub mod csv;
