mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use atelier_admissions::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
