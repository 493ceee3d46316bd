//! cfenv - Typed access to Cloud Foundry service bindings.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── services      # List bound services
//! │   ├── get           # Print credentials and URIs
//! │   └── inspect       # Describe keys and certificates
//! └── core/             # Core library components
//!     ├── environment   # VCAP_SERVICES ingestion
//!     ├── credentials   # Credential tree navigation
//!     └── crypto/       # PEM/DER decoding
//!         ├── armor     # PEM envelope
//!         ├── asn1      # DER structures
//!         ├── algorithm # Algorithm OIDs
//!         ├── ec        # P-256 curve support
//!         ├── key       # RSA/DSA/EC/DH keys
//!         └── certificate # X.509 certificates
//! ```
//!
//! # Example
//!
//! ```no_run
//! use cfenv::Environment;
//!
//! # fn main() -> cfenv::Result<()> {
//! let env = Environment::from_process()?;
//! let db = env.service("db")?;
//! let uri = db.credentials().get_uri()?;
//! let ca = db.credentials().get_certificate(&["ssl", "ca_cert"])?;
//! println!("{} signed by {}", uri, ca.issuer());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - Certificates, SubjectPublicKeyInfo, PKCS#8, PKCS#1, SEC1 and OpenSSL DSA keys
//! - RSA, DSA, EC (P-256) and Diffie-Hellman
//! - Exact arbitrary-precision key fields
//! - Absent vs. malformed vs. undecodable credentials reported as distinct errors

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::credentials::{navigate, Credentials};
pub use crate::core::crypto::{parse, parse_certificate, parse_key, Certificate, Key, KeyMaterial};
pub use crate::core::environment::{Environment, Service};
pub use crate::core::types::ServiceUri;
pub use crate::error::{Error, ErrorKind, Result};
