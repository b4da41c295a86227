#[actix_web::main]
async fn main() {
    if let Err(err) = csv_ingest_lib::run().await {
        eprintln!("csv-ingest failed to start: {}", err);
        std::process::exit(1);
    }
}
