use thiserror::Error;

/// Top-level error for every cfenv operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while navigating a service's credential tree.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The path is absent, or a node along it has the wrong shape.
    #[error("credential not found: {path}")]
    NotFound { path: String },

    /// The value is present but fails a stricter syntactic check.
    #[error("malformed credential at {path}: {reason}")]
    MalformedValue { path: String, reason: String },
}

/// Failures while decoding PEM armor or the DER structure inside it.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no PEM block found")]
    MissingArmor,

    #[error("malformed PEM: {0}")]
    Pem(#[from] pem::PemError),

    #[error("unsupported PEM label: {0}")]
    UnsupportedLabel(String),

    #[error("expected {expected}, found PEM label '{found}'")]
    UnexpectedLabel {
        expected: &'static str,
        found: String,
    },

    #[error("encrypted PEM is not supported: {0}")]
    Encrypted(String),

    #[error("malformed DER: {0}")]
    Der(#[from] der::Error),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),

    #[error("unsupported {structure} version: {version}")]
    UnsupportedVersion {
        structure: &'static str,
        version: u8,
    },

    #[error("missing {0}")]
    MissingParameters(&'static str),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),
}

/// Failures while reading the service binding environment.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("environment variable {0} is not set")]
    MissingVariable(String),

    #[error("service bindings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed service binding: {0}")]
    MalformedService(String),

    #[error("no service named '{0}'")]
    ServiceNotFound(String),
}

/// Coarse classification of an [`Error`].
///
/// Lets callers tell "binding misconfigured" apart from "key material corrupt"
/// without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedValue,
    DecodeFailure,
    Environment,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Credential(CredentialError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Credential(CredentialError::MalformedValue { .. }) => ErrorKind::MalformedValue,
            Error::Decode(_) => ErrorKind::DecodeFailure,
            Error::Environment(EnvironmentError::ServiceNotFound(_)) => ErrorKind::NotFound,
            Error::Environment(_) => ErrorKind::Environment,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl CredentialError {
    pub(crate) fn not_found(path: &[&str]) -> Self {
        Self::NotFound {
            path: display_path(path),
        }
    }

    pub(crate) fn malformed(path: &[&str], reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            path: display_path(path),
            reason: reason.into(),
        }
    }
}

fn display_path(path: &[&str]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
