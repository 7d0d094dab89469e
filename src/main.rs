//! Foodie command line

use std::{io, process::ExitCode};

use foodie_cart::{catalog::Catalog, context::AppContext, ids::UserId};
use tracing::error;

use crate::config::AppConfig;

mod cli;
mod config;
mod observability;

fn main() -> ExitCode {
    let config = AppConfig::load();

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialised, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");

            #[expect(clippy::print_stderr, reason = "user-facing error message")]
            {
                eprintln!("error: {message}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> Result<(), String> {
    let catalog = Catalog::load(&config.catalog.path)
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let user = config
        .user
        .filter(|user| !user.trim().is_empty())
        .map(UserId::from);

    let mut context = AppContext::open(
        config.storage.data_dir,
        catalog,
        (&config.pricing).into(),
        user,
    )
    .map_err(|error| format!("failed to start: {error}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    config
        .command
        .run(&mut context, &mut out)
        .map_err(|error| error.to_string())
}
