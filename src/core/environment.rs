//! Service binding ingestion.
//!
//! The platform publishes bound services in `VCAP_SERVICES` as a JSON object
//! keyed by offering label, each holding a list of service entries:
//!
//! ```json
//! {
//!   "p-mysql": [
//!     { "name": "db", "label": "p-mysql", "plan": "small",
//!       "tags": ["mysql"], "credentials": { "uri": "mysql://..." } }
//!   ]
//! }
//! ```
//!
//! Services keep document order. When two bindings share a name, the first
//! one wins.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::constants::VCAP_SERVICES;
use crate::core::credentials::Credentials;
use crate::core::types::{CredentialTree, ServiceLabel, ServiceName};
use crate::error::{EnvironmentError, Result};

/// One entry of a label's service list, as published by the platform.
#[derive(Debug, Deserialize)]
struct ServiceEntry {
    name: ServiceName,
    #[serde(default)]
    label: Option<ServiceLabel>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    instance_name: Option<String>,
    #[serde(default)]
    binding_name: Option<String>,
    #[serde(default = "empty_credentials")]
    credentials: CredentialTree,
}

fn empty_credentials() -> CredentialTree {
    Value::Object(serde_json::Map::new())
}

/// A bound service.
#[derive(Debug, Clone)]
pub struct Service {
    name: ServiceName,
    label: ServiceLabel,
    plan: Option<String>,
    tags: Vec<String>,
    instance_name: Option<String>,
    binding_name: Option<String>,
    credentials: Credentials,
}

impl Service {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offering label; falls back to the enclosing key when the entry omits it.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    pub fn binding_name(&self) -> Option<&str> {
        self.binding_name.as_deref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// All services bound to the application.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    services: Vec<Service>,
}

impl Environment {
    /// Read bindings from `VCAP_SERVICES` in the process environment.
    pub fn from_process() -> Result<Self> {
        Self::from_process_var(VCAP_SERVICES)
    }

    /// Read bindings from an arbitrary process environment variable.
    ///
    /// # Errors
    ///
    /// `MissingVariable` if unset, `MalformedService` if not valid unicode,
    /// otherwise as [`Environment::from_json`].
    pub fn from_process_var(name: &str) -> Result<Self> {
        match std::env::var(name) {
            Ok(text) => Self::from_json(&text),
            Err(std::env::VarError::NotPresent) => {
                Err(EnvironmentError::MissingVariable(name.to_string()).into())
            }
            Err(std::env::VarError::NotUnicode(_)) => Err(EnvironmentError::MalformedService(
                format!("{} is not valid unicode", name),
            )
            .into()),
        }
    }

    /// Read bindings from `VCAP_SERVICES` among the given variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (_, value) = vars
            .into_iter()
            .find(|(key, _)| key.as_ref() == VCAP_SERVICES)
            .ok_or_else(|| EnvironmentError::MissingVariable(VCAP_SERVICES.to_string()))?;
        Self::from_json(value.as_ref())
    }

    /// Parse the bindings JSON document.
    ///
    /// # Errors
    ///
    /// `Parse` for invalid JSON; `MalformedService` if the document is not an
    /// object of lists, or an entry lacks a name.
    pub fn from_json(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text).map_err(EnvironmentError::Parse)?;
        let labels = root.as_object().ok_or_else(|| {
            EnvironmentError::MalformedService("service bindings must be a JSON object".to_string())
        })?;

        let mut services = Vec::new();
        for (label, entries) in labels {
            let entries = entries.as_array().ok_or_else(|| {
                EnvironmentError::MalformedService(format!("'{}' is not a list of services", label))
            })?;

            for (index, entry) in entries.iter().enumerate() {
                let entry = ServiceEntry::deserialize(entry).map_err(|e| {
                    EnvironmentError::MalformedService(format!("{}[{}]: {}", label, index, e))
                })?;
                services.push(Service {
                    label: entry.label.unwrap_or_else(|| label.clone()),
                    name: entry.name,
                    plan: entry.plan,
                    tags: entry.tags,
                    instance_name: entry.instance_name,
                    binding_name: entry.binding_name,
                    credentials: Credentials::new(entry.credentials),
                });
            }
        }

        debug!(count = services.len(), "loaded service bindings");
        Ok(Self { services })
    }

    /// The first service bound under `name`.
    pub fn service(&self, name: &str) -> Result<&Service> {
        debug!(service = name, "service lookup");
        self.services
            .iter()
            .find(|service| service.name == name)
            .ok_or_else(|| EnvironmentError::ServiceNotFound(name.to_string()).into())
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Distinct service names in document order.
    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.services.len());
        for service in &self.services {
            if !names.contains(&service.name()) {
                names.push(service.name());
            }
        }
        names
    }

    pub fn services_with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Service> + 'a {
        self.services.iter().filter(move |service| service.label == label)
    }

    pub fn services_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Service> + 'a {
        self.services.iter().filter(move |service| service.has_tag(tag))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
