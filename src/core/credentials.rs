//! Credential tree navigation.
//!
//! A service binding's `credentials` object is an arbitrary JSON tree. Lookups
//! walk it by key path and fail with [`CredentialError::NotFound`] whenever a
//! key is missing or a node on the way is not an object. A `null` leaf is a
//! successful lookup.

use serde_json::Value;
use tracing::debug;

use crate::core::constants::URI_FIELD;
use crate::core::crypto::{self, Certificate, Key, KeyMaterial};
use crate::core::types::{CredentialTree, ServiceUri};
use crate::error::{CredentialError, Result};

/// Walk `tree` one object key per path segment.
///
/// An empty path returns the root.
///
/// # Errors
///
/// Returns `CredentialError::NotFound` if a segment is missing or the node it
/// is looked up in is not an object.
pub fn navigate<'a>(tree: &'a Value, path: &[&str]) -> std::result::Result<&'a Value, CredentialError> {
    path.iter().try_fold(tree, |node, segment| {
        node.as_object()
            .and_then(|object| object.get(*segment))
            .ok_or_else(|| CredentialError::not_found(path))
    })
}

/// Typed accessors over one service's credential tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    tree: CredentialTree,
}

impl Credentials {
    pub fn new(tree: CredentialTree) -> Self {
        Self { tree }
    }

    /// The raw tree.
    pub fn tree(&self) -> &CredentialTree {
        &self.tree
    }

    /// Value at `path`, which may be `null`.
    pub fn get(&self, path: &[&str]) -> Result<&Value> {
        debug!(path = %path.join("."), "credential lookup");
        Ok(navigate(&self.tree, path)?)
    }

    /// String credential at `path`. A `null` leaf gives `None`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the path is absent or the leaf is neither a string nor null.
    pub fn get_credential(&self, path: &[&str]) -> Result<Option<&str>> {
        match self.get(path)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            _ => Err(CredentialError::not_found(path).into()),
        }
    }

    /// String credential at `path`; `null` counts as absent.
    pub fn get_string(&self, path: &[&str]) -> Result<&str> {
        self.get_credential(path)?
            .ok_or_else(|| CredentialError::not_found(path).into())
    }

    /// The service URI stored under the top-level `uri` key.
    ///
    /// Any RFC 3986 URI reference is accepted, relative ones included. The
    /// result borrows the stored text unchanged.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `MalformedValue` if the text is not a URI reference.
    pub fn get_uri(&self) -> Result<ServiceUri<'_>> {
        let path = [URI_FIELD];
        let text = self.get_string(&path)?;
        ServiceUri::parse(text).map_err(|e| CredentialError::malformed(&path, e.to_string()).into())
    }

    /// Certificate stored as PEM text at `path`.
    pub fn get_certificate(&self, path: &[&str]) -> Result<Certificate> {
        crypto::parse_certificate(self.get_string(path)?)
    }

    /// Public or private key stored as PEM text at `path`.
    pub fn get_key(&self, path: &[&str]) -> Result<Key> {
        crypto::parse_key(self.get_string(path)?)
    }

    /// Whatever PEM block is stored at `path`.
    pub fn get_key_material(&self, path: &[&str]) -> Result<KeyMaterial> {
        crypto::parse(self.get_string(path)?)
    }
}

impl From<CredentialTree> for Credentials {
    fn from(tree: CredentialTree) -> Self {
        Self::new(tree)
    }
}
