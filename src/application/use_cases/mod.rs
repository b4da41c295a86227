pub mod csv_ingest;
