mod cli;
mod infra;
mod report;
mod routes;
mod server;

use buildhub_timeline::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
