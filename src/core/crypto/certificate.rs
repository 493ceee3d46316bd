//! X.509 certificates.
//!
//! Wraps `x509_cert::Certificate` with the accessors service bindings need.
//! No chain, revocation or expiry checks are performed.

use chrono::{DateTime, Utc};
use const_oid::ObjectIdentifier;
use der::asn1::{Ia5StringRef, PrintableStringRef, Utf8StringRef};
use der::{Decode, Encode};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use x509_cert::name::Name;
use x509_cert::time::Time;

use super::key::PublicKey;
use crate::error::DecodeError;

/// Attribute types with a conventional short keyword, in the order they are
/// most commonly seen.
const ATTRIBUTE_KEYWORDS: &[(&str, &str)] = &[
    ("2.5.4.3", "CN"),
    ("2.5.4.11", "OU"),
    ("2.5.4.10", "O"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.6", "C"),
    ("2.5.4.9", "STREET"),
    ("2.5.4.5", "SERIALNUMBER"),
    ("2.5.4.12", "T"),
    ("2.5.4.4", "SURNAME"),
    ("2.5.4.42", "GIVENNAME"),
    ("2.5.4.43", "INITIALS"),
    ("2.5.4.44", "GENERATION"),
    ("2.5.4.46", "DNQUALIFIER"),
    ("0.9.2342.19200300.100.1.25", "DC"),
    ("0.9.2342.19200300.100.1.1", "UID"),
    ("1.2.840.113549.1.9.1", "EMAILADDRESS"),
];

/// Characters that force a value to be quoted.
const SPECIAL: &[char] = &[',', '+', '=', '"', '\\', '<', '>', '#', ';', '\n'];

/// A decoded X.509 certificate.
#[derive(Clone, Debug)]
pub struct Certificate {
    inner: x509_cert::Certificate,
    der: Vec<u8>,
    subject: String,
    issuer: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

impl Certificate {
    /// Decode a DER-encoded certificate.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Der` for malformed input, or
    /// `DecodeError::InvalidCertificate` if a validity time cannot be represented.
    pub fn from_der(der: &[u8]) -> Result<Self, DecodeError> {
        let inner = x509_cert::Certificate::from_der(der)?;
        let tbs = &inner.tbs_certificate;

        let subject = distinguished_name(&tbs.subject);
        let issuer = distinguished_name(&tbs.issuer);
        let not_before = timestamp(&tbs.validity.not_before)?;
        let not_after = timestamp(&tbs.validity.not_after)?;

        Ok(Self {
            der: der.to_vec(),
            subject,
            issuer,
            not_before,
            not_after,
            inner,
        })
    }

    /// Subject distinguished name, most specific RDN first (e.g. `CN=app, O=Org`).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Issuer distinguished name, formatted like [`Certificate::subject`].
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn is_self_issued(&self) -> bool {
        self.inner.tbs_certificate.subject == self.inner.tbs_certificate.issuer
    }

    pub fn serial_number(&self) -> BigUint {
        BigUint::from_bytes_be(self.inner.tbs_certificate.serial_number.as_bytes())
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Signature algorithm name, or its dotted OID if unnamed.
    pub fn signature_algorithm(&self) -> String {
        oid_name(&self.inner.signature_algorithm.oid)
    }

    /// Decode the subject public key.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the key algorithm is unsupported or malformed.
    pub fn public_key(&self) -> Result<PublicKey, DecodeError> {
        let spki = self.inner.tbs_certificate.subject_public_key_info.to_der()?;
        super::decode_spki(&spki)
    }

    /// Lowercase hex SHA-256 digest of the DER encoding.
    pub fn sha256_fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.der))
    }

    pub fn to_der(&self) -> &[u8] {
        &self.der
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

fn timestamp(time: &Time) -> Result<DateTime<Utc>, DecodeError> {
    let since_epoch = time.to_unix_duration();
    i64::try_from(since_epoch.as_secs())
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, since_epoch.subsec_nanos()))
        .ok_or_else(|| DecodeError::InvalidCertificate(format!("validity time out of range: {:?}", time)))
}

fn oid_name(oid: &ObjectIdentifier) -> String {
    const_oid::db::DB
        .by_oid(oid)
        .map(str::to_string)
        .unwrap_or_else(|| oid.to_string())
}

/// Render a name the way most TLS tooling prints it: RDNs in reverse encoding
/// order joined by `", "`, multi-valued RDNs joined by `" + "`.
pub(crate) fn distinguished_name(name: &Name) -> String {
    name.0
        .iter()
        .rev()
        .map(|rdn| {
            rdn.0
                .iter()
                .map(|atv| format!("{}={}", keyword(&atv.oid), attribute_value(&atv.value)))
                .collect::<Vec<_>>()
                .join(" + ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn keyword(oid: &ObjectIdentifier) -> String {
    let dotted = oid.to_string();
    ATTRIBUTE_KEYWORDS
        .iter()
        .find(|(known, _)| *known == dotted)
        .map(|(_, keyword)| keyword.to_string())
        .unwrap_or_else(|| format!("OID.{}", dotted))
}

fn attribute_value(value: &der::Any) -> String {
    let text = if let Ok(s) = PrintableStringRef::try_from(value) {
        s.to_string()
    } else if let Ok(s) = Utf8StringRef::try_from(value) {
        s.to_string()
    } else if let Ok(s) = Ia5StringRef::try_from(value) {
        s.to_string()
    } else {
        // Unknown string types are shown as their hex DER encoding.
        return match value.to_der() {
            Ok(der) => format!("#{}", hex::encode(der)),
            Err(_) => "#".to_string(),
        };
    };

    if text.contains(SPECIAL) || text.starts_with(' ') || text.ends_with(' ') {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        text
    }
}
