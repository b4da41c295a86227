use std::sync::Arc;

use tracing::{error, info};

use crate::application::CsvIngestUseCase;
use crate::domain::error::Result;
use crate::domain::ingest_config::IngestConfig;
use crate::infrastructure::storage::UploadStore;

/// Create the upload directory if needed and wire the ingest use case.
pub fn setup(config: &IngestConfig) -> Result<Arc<CsvIngestUseCase>> {
    let upload_dir = config.upload_dir_path();

    let store = UploadStore::open(&upload_dir).map_err(|err| {
        error!(
            error = %err,
            upload_dir = %upload_dir.display(),
            "Failed to create upload dir"
        );
        err
    })?;

    let upload_dir = store.root().to_path_buf();
    let ingest = CsvIngestUseCase::new(store, config.mode);
    info!(
        upload_dir = %upload_dir.display(),
        mode = ?ingest.mode(),
        error_status = ?config.error_status,
        "Upload directory ready"
    );

    Ok(Arc::new(ingest))
}
