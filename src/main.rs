//! cfenv - Inspect Cloud Foundry service bindings.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cfenv::cli::output;
use cfenv::cli::{execute, Cli};
use cfenv::core::constants::LOG_ENV;
use cfenv::error::{CredentialError, EnvironmentError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cfenv=debug")
        } else {
            EnvFilter::new("cfenv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    let source = cli.source();
    if let Err(e) = execute(cli.command, source) {
        let suggestion = match &e {
            Error::Environment(EnvironmentError::MissingVariable(_)) => {
                Some("run inside a bound app, or pass --file <bindings.json>")
            }
            Error::Environment(EnvironmentError::ServiceNotFound(_)) => {
                Some("run: cfenv services")
            }
            Error::Credential(CredentialError::NotFound { .. }) => {
                Some("run: cfenv get <service> to see its credentials")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
