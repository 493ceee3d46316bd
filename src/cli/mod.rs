//! Command-line interface.

pub mod get;
pub mod inspect;
pub mod output;
pub mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::constants::VCAP_SERVICES;
use crate::core::environment::Environment;
use crate::error::Result;

/// cfenv - Inspect Cloud Foundry service bindings.
#[derive(Parser)]
#[command(
    name = "cfenv",
    about = "Inspect Cloud Foundry service bindings: credentials, URIs, certificates and keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment variable holding the service bindings JSON
    #[arg(long, global = true, value_name = "NAME", default_value = VCAP_SERVICES)]
    pub var: String,

    /// Read service bindings from a JSON file instead of the environment
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Where this invocation reads its service bindings from.
    pub fn source(&self) -> Source {
        match &self.file {
            Some(path) => Source::File(path.clone()),
            None => Source::Variable(self.var.clone()),
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List bound services
    Services {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a credential (the whole credentials object if no path is given)
    Get {
        /// Service name
        service: String,
        /// Key path into the credentials (e.g. ssl ca_cert)
        path: Vec<String>,
    },

    /// Print a service's URI
    Uri {
        /// Service name
        service: String,
    },

    /// Describe a PEM key stored in a credential
    Key {
        /// Service name
        service: String,
        /// Key path into the credentials
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Describe a PEM certificate stored in a credential
    Cert {
        /// Service name
        service: String,
        /// Key path into the credentials
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// Describe a PEM file
    Inspect {
        /// Path to a PEM file
        file: PathBuf,
    },
}

/// Origin of the service bindings JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Variable(String),
    File(PathBuf),
}

impl Source {
    /// Load and parse the bindings.
    pub fn load(&self) -> Result<Environment> {
        debug!(source = ?self, "loading service bindings");
        match self {
            Source::Variable(name) => Environment::from_process_var(name),
            Source::File(path) => Environment::from_json(&std::fs::read_to_string(path)?),
        }
    }
}

/// Execute a command.
pub fn execute(command: Command, source: Source) -> Result<()> {
    use Command::*;

    match command {
        Services { json } => services::list(&source.load()?, json),
        Get { service, path } => get::credential(&source.load()?, &service, &segments(&path)),
        Uri { service } => get::uri(&source.load()?, &service),
        Key { service, path } => inspect::key(&source.load()?, &service, &segments(&path)),
        Cert { service, path } => inspect::cert(&source.load()?, &service, &segments(&path)),
        Inspect { file } => inspect::file(&file),
    }
}

fn segments(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}
