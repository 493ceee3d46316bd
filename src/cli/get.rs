//! Credential commands (get, uri).

use serde_json::Value;

use crate::cli::output;
use crate::core::environment::Environment;
use crate::error::Result;

/// Print the credential at `path`: strings raw, anything else as JSON.
pub fn credential(env: &Environment, service: &str, path: &[&str]) -> Result<()> {
    let value = env.service(service)?.credentials().get(path)?;
    match value {
        Value::String(s) => output::data(s),
        other => output::data(&format!("{:#}", other)),
    }
    Ok(())
}

/// Print the service's URI.
pub fn uri(env: &Environment, service: &str) -> Result<()> {
    let uri = env.service(service)?.credentials().get_uri()?;
    output::data(uri.as_str());
    Ok(())
}
