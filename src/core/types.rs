//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A parsed credential tree (one service binding's `credentials` object).
pub type CredentialTree = serde_json::Value;

/// A bound service's name (e.g., `my-postgres`).
pub type ServiceName = String;

/// A service offering label (e.g., `p-mysql`, `user-provided`).
pub type ServiceLabel = String;

/// A PEM-armored text block.
pub type PemText = str;

/// A service URI reference, borrowed verbatim from the credential tree.
pub type ServiceUri<'a> = fluent_uri::UriRef<&'a str>;
