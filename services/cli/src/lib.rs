mod cli;
mod commands;
mod demo;

use teamfit::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
