mod cli;
mod infra;
mod rank;
mod routes;
mod server;

use interest_groups::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
