mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use green_lending::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
