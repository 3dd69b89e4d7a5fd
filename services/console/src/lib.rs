mod cli;
mod commands;
mod infra;
mod render;
mod server;

use staff_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
