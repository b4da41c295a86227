use crate::application::CsvIngestUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::ingest_config::{ErrorStatusPolicy, IngestConfig};
use crate::domain::stored_file::INVALID_CSV_MESSAGE;
use actix_cors::Cors;
use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer};
use futures_util::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

pub struct HttpState {
    pub ingest: Arc<CsvIngestUseCase>,
    pub error_status: ErrorStatusPolicy,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

struct FileUpload {
    filename: String,
    bytes: Vec<u8>,
}

#[post("/upload-csv")]
async fn upload_csv(data: web::Data<HttpState>, payload: Multipart) -> HttpResponse {
    let upload = match read_file_field(payload).await {
        Ok(upload) => upload,
        Err(e) => return error_response(data.error_status, e),
    };

    let ingest = data.ingest.clone();
    let result = run_blocking(move || ingest.upload(&upload.filename, &upload.bytes)).await;
    respond(data.error_status, result)
}

#[get("/list")]
async fn list_files(data: web::Data<HttpState>) -> HttpResponse {
    let ingest = data.ingest.clone();
    let result = run_blocking(move || ingest.list()).await;
    respond(data.error_status, result)
}

#[get("/read/{filename}")]
async fn read_file(data: web::Data<HttpState>, filename: web::Path<String>) -> HttpResponse {
    let filename = filename.into_inner();
    let ingest = data.ingest.clone();
    let result = run_blocking(move || ingest.read(&filename)).await;
    respond(data.error_status, result)
}

/// Drain every field, keeping the first one named `file`.
async fn read_file_field(mut payload: Multipart) -> Result<FileUpload> {
    let mut upload = None;

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let (name, filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            bytes.extend_from_slice(&chunk);
        }

        if upload.is_none() && name.as_deref() == Some(FILE_FIELD) {
            upload = Some(FileUpload {
                filename: filename.unwrap_or_default(),
                bytes,
            });
        }
    }

    upload.ok_or_else(|| {
        warn!("Upload request without a '{}' field", FILE_FIELD);
        AppError::ValidationError(INVALID_CSV_MESSAGE.to_string())
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    warn!(error = %err, "Malformed multipart upload");
    AppError::ValidationError(INVALID_CSV_MESSAGE.to_string())
}

/// Run filesystem and parsing work off the async workers
async fn run_blocking<F, T>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(task)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}

fn respond<T: Serialize>(policy: ErrorStatusPolicy, result: Result<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => error_response(policy, e),
    }
}

/// Status for an expected failure under the configured policy
pub fn status_for(policy: ErrorStatusPolicy, err: &AppError) -> StatusCode {
    match (policy, err) {
        (ErrorStatusPolicy::AlwaysOk, _) => StatusCode::OK,
        (ErrorStatusPolicy::Mapped, AppError::NotFound(_)) => StatusCode::NOT_FOUND,
        (ErrorStatusPolicy::Mapped, _) => StatusCode::BAD_REQUEST,
    }
}

fn error_response(policy: ErrorStatusPolicy, err: AppError) -> HttpResponse {
    if err.is_expected() {
        return HttpResponse::build(status_for(policy, &err)).json(ErrorBody {
            error: err.message().to_string(),
        });
    }

    error!(error = %err, "Request failed");
    HttpResponse::InternalServerError().body(err.to_string())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_csv)
        .service(list_files)
        .service(read_file);
}

pub fn start_server(config: &IngestConfig, ingest: Arc<CsvIngestUseCase>) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        ingest,
        error_status: config.error_status,
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser clients post from other origins

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
