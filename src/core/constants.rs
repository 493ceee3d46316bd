//! Constants used throughout cfenv.
//!
//! Centralizes environment variable names and PEM labels.

/// Environment variable holding the service bindings JSON.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// Environment variable controlling the log filter of the `cfenv` binary.
pub const LOG_ENV: &str = "CFENV_LOG";

/// Top-level credential field holding a service URI.
pub const URI_FIELD: &str = "uri";

/// PEM labels understood by the crypto parser.
pub mod labels {
    pub const CERTIFICATE: &str = "CERTIFICATE";
    pub const X509_CERTIFICATE: &str = "X509 CERTIFICATE";
    pub const PUBLIC_KEY: &str = "PUBLIC KEY";
    pub const RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
    pub const PRIVATE_KEY: &str = "PRIVATE KEY";
    pub const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
    pub const EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";
    pub const DSA_PRIVATE_KEY: &str = "DSA PRIVATE KEY";
    pub const ENCRYPTED_PRIVATE_KEY: &str = "ENCRYPTED PRIVATE KEY";
}
