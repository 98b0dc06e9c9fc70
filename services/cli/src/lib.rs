mod cli;
mod demo;
mod infra;
mod render;
mod report;

use sollist::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
