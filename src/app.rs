use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;

pub async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = ConfigService::new().load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let ingest = crate::infrastructure::bootstrap::setup(&config)?;

    let server = crate::interfaces::http::start_server(&config, ingest)?;
    info!(host = %config.host, port = config.port, "CSV ingest server listening");

    server.await?;
    info!("CSV ingest server stopped");
    Ok(())
}
