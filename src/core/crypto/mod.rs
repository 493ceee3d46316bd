//! PEM/DER crypto parsing.
//!
//! Classifies a PEM block by its label, strips the armor and decodes the DER
//! body into a certificate, public key or private key. The generic containers
//! (`PUBLIC KEY`, `PRIVATE KEY`) are further dispatched on the algorithm OID
//! they carry.
//!
//! ## Supported encodings
//!
//! | Label             | Container               | Algorithms          |
//! |-------------------|-------------------------|---------------------|
//! | `CERTIFICATE`     | X.509                   | any                 |
//! | `PUBLIC KEY`      | SubjectPublicKeyInfo    | RSA, DSA, EC, DH    |
//! | `PRIVATE KEY`     | PKCS#8                  | RSA, DSA, EC, DH    |
//! | `RSA PUBLIC KEY`  | PKCS#1                  | RSA                 |
//! | `RSA PRIVATE KEY` | PKCS#1                  | RSA                 |
//! | `EC PRIVATE KEY`  | SEC1                    | EC (P-256)          |
//! | `DSA PRIVATE KEY` | OpenSSL traditional     | DSA                 |
//!
//! Decoding is pure: the same input always yields the same value.

pub mod algorithm;
mod armor;
mod asn1;
pub mod certificate;
pub mod ec;
pub mod key;

use der::asn1::{AnyRef, UintRef};
use der::Decode;
use pkcs8::PrivateKeyInfo;
use spki::SubjectPublicKeyInfoRef;
use tracing::{debug, trace};

pub use algorithm::Algorithm;
pub use certificate::Certificate;
pub use ec::{CurveParameters, EcPoint, NamedCurve};
pub use key::{
    DhParameters, DhPrivateKey, DhPublicKey, DsaParameters, DsaPrivateKey, DsaPublicKey,
    EcPrivateKey, EcPublicKey, Key, PrivateKey, PublicKey, RsaPrivateKey, RsaPublicKey,
};

use crate::core::constants::labels;
use crate::core::types::PemText;
use crate::error::{DecodeError, Result};
use asn1::{
    DhParameterDer, DsaPrivateKeyDer, DssParmsDer, EcPrivateKeyDer, RsaPrivateKeyDer,
    RsaPublicKeyDer,
};

/// Anything a PEM block can decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Certificate(Certificate),
    PublicKey(PublicKey),
    PrivateKey(PrivateKey),
}

/// DER structure selected by a PEM label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Certificate,
    SubjectPublicKeyInfo,
    Pkcs1PublicKey,
    Pkcs8PrivateKey,
    Pkcs1PrivateKey,
    Sec1PrivateKey,
    DsaPrivateKey,
}

const ENCODINGS: &[(&str, Encoding)] = &[
    (labels::CERTIFICATE, Encoding::Certificate),
    (labels::X509_CERTIFICATE, Encoding::Certificate),
    (labels::PUBLIC_KEY, Encoding::SubjectPublicKeyInfo),
    (labels::RSA_PUBLIC_KEY, Encoding::Pkcs1PublicKey),
    (labels::PRIVATE_KEY, Encoding::Pkcs8PrivateKey),
    (labels::RSA_PRIVATE_KEY, Encoding::Pkcs1PrivateKey),
    (labels::EC_PRIVATE_KEY, Encoding::Sec1PrivateKey),
    (labels::DSA_PRIVATE_KEY, Encoding::DsaPrivateKey),
];

impl Encoding {
    fn for_label(label: &str) -> std::result::Result<Self, DecodeError> {
        ENCODINGS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, encoding)| *encoding)
            .ok_or_else(|| DecodeError::UnsupportedLabel(label.to_string()))
    }

    fn decode(self, der: &[u8]) -> std::result::Result<KeyMaterial, DecodeError> {
        Ok(match self {
            Encoding::Certificate => KeyMaterial::Certificate(Certificate::from_der(der)?),
            Encoding::SubjectPublicKeyInfo => KeyMaterial::PublicKey(decode_spki(der)?),
            Encoding::Pkcs1PublicKey => KeyMaterial::PublicKey(PublicKey::Rsa(
                RsaPublicKey::from_der(&RsaPublicKeyDer::from_der(der)?)?,
            )),
            Encoding::Pkcs8PrivateKey => KeyMaterial::PrivateKey(decode_pkcs8(der)?),
            Encoding::Pkcs1PrivateKey => KeyMaterial::PrivateKey(PrivateKey::Rsa(
                RsaPrivateKey::from_der(&RsaPrivateKeyDer::from_der(der)?)?,
            )),
            Encoding::Sec1PrivateKey => {
                KeyMaterial::PrivateKey(PrivateKey::Ec(decode_sec1(der, None)?))
            }
            Encoding::DsaPrivateKey => KeyMaterial::PrivateKey(PrivateKey::Dsa(
                DsaPrivateKey::from_openssl_der(&DsaPrivateKeyDer::from_der(der)?)?,
            )),
        })
    }
}

/// Decode any supported PEM block.
///
/// # Errors
///
/// Returns `Error::Decode` if the armor, label, DER structure or key values
/// are invalid or unsupported.
pub fn parse(pem: &PemText) -> Result<KeyMaterial> {
    let block = armor::decode(pem)?;
    let encoding = Encoding::for_label(&block.label)?;
    debug!(label = %block.label, ?encoding, "decoding pem block");
    Ok(encoding.decode(&block.der)?)
}

/// Decode a PEM-encoded public or private key.
///
/// # Errors
///
/// Returns `DecodeError::UnexpectedLabel` for a certificate, otherwise as [`parse`].
pub fn parse_key(pem: &PemText) -> Result<Key> {
    let block = armor::decode(pem)?;
    let encoding = Encoding::for_label(&block.label)?;
    if encoding == Encoding::Certificate {
        return Err(DecodeError::UnexpectedLabel {
            expected: "a key",
            found: block.label,
        }
        .into());
    }
    debug!(label = %block.label, ?encoding, "decoding key");
    match encoding.decode(&block.der)? {
        KeyMaterial::PublicKey(key) => Ok(Key::Public(key)),
        KeyMaterial::PrivateKey(key) => Ok(Key::Private(key)),
        KeyMaterial::Certificate(_) => Err(DecodeError::UnexpectedLabel {
            expected: "a key",
            found: block.label,
        }
        .into()),
    }
}

/// Decode a PEM-encoded X.509 certificate.
///
/// # Errors
///
/// Returns `DecodeError::UnexpectedLabel` for a key, otherwise as [`parse`].
pub fn parse_certificate(pem: &PemText) -> Result<Certificate> {
    let block = armor::decode(pem)?;
    if Encoding::for_label(&block.label)? != Encoding::Certificate {
        return Err(DecodeError::UnexpectedLabel {
            expected: "a certificate",
            found: block.label,
        }
        .into());
    }
    Ok(Certificate::from_der(&block.der)?)
}

/// Decode an X.509 `SubjectPublicKeyInfo`.
pub(crate) fn decode_spki(der: &[u8]) -> std::result::Result<PublicKey, DecodeError> {
    let spki = SubjectPublicKeyInfoRef::from_der(der)?;
    let algorithm = Algorithm::from_oid(&spki.algorithm.oid)?;
    let params = spki.algorithm.parameters;
    let key_bytes = spki.subject_public_key.as_bytes().ok_or_else(|| {
        DecodeError::InvalidKey("public key bit string is not octet aligned".to_string())
    })?;
    trace!(%algorithm, key_len = key_bytes.len(), "subject public key info");

    Ok(match algorithm {
        Algorithm::Rsa => {
            PublicKey::Rsa(RsaPublicKey::from_der(&RsaPublicKeyDer::from_der(key_bytes)?)?)
        }
        Algorithm::Dsa => {
            let y = UintRef::from_der(key_bytes)?;
            PublicKey::Dsa(DsaPublicKey::new(dsa_parameters(params)?, asn1::uint(&y))?)
        }
        Algorithm::Ec => PublicKey::Ec(EcPublicKey::from_sec1_point(
            ec_curve(params)?,
            key_bytes,
        )?),
        Algorithm::DiffieHellman => {
            let y = UintRef::from_der(key_bytes)?;
            PublicKey::Dh(DhPublicKey::new(dh_parameters(params)?, asn1::uint(&y))?)
        }
    })
}

/// Decode a PKCS#8 `PrivateKeyInfo`.
fn decode_pkcs8(der: &[u8]) -> std::result::Result<PrivateKey, DecodeError> {
    let info = PrivateKeyInfo::from_der(der)?;
    let algorithm = Algorithm::from_oid(&info.algorithm.oid)?;
    let params = info.algorithm.parameters;
    trace!(%algorithm, "pkcs8 private key info");

    Ok(match algorithm {
        Algorithm::Rsa => PrivateKey::Rsa(RsaPrivateKey::from_der(&RsaPrivateKeyDer::from_der(
            info.private_key,
        )?)?),
        Algorithm::Dsa => {
            let x = UintRef::from_der(info.private_key)?;
            PrivateKey::Dsa(DsaPrivateKey::new(dsa_parameters(params)?, x.as_bytes())?)
        }
        Algorithm::Ec => PrivateKey::Ec(decode_sec1(info.private_key, Some(ec_curve(params)?))?),
        Algorithm::DiffieHellman => {
            let x = UintRef::from_der(info.private_key)?;
            PrivateKey::Dh(DhPrivateKey::new(dh_parameters(params)?, x.as_bytes())?)
        }
    })
}

/// Decode a SEC1 `ECPrivateKey`. `outer` is the curve named by an enclosing
/// PKCS#8 container, if any.
fn decode_sec1(
    der: &[u8],
    outer: Option<NamedCurve>,
) -> std::result::Result<EcPrivateKey, DecodeError> {
    let sec1 = EcPrivateKeyDer::from_der(der)?;
    if sec1.version != 1 {
        return Err(DecodeError::UnsupportedVersion {
            structure: "ECPrivateKey",
            version: sec1.version,
        });
    }

    let inner = sec1.parameters.map(NamedCurve::from_parameters).transpose()?;
    let curve = match (outer, inner) {
        (Some(outer), Some(inner)) if outer != inner => {
            return Err(DecodeError::InvalidKey(format!(
                "curve {} in key does not match {} in algorithm identifier",
                inner, outer
            )));
        }
        (Some(curve), _) | (None, Some(curve)) => curve,
        (None, None) => return Err(DecodeError::MissingParameters("EC domain parameters")),
    };

    let public_key = match sec1.public_key {
        Some(bits) => Some(bits.as_bytes().ok_or_else(|| {
            DecodeError::InvalidKey("EC public key bit string is not octet aligned".to_string())
        })?),
        None => None,
    };

    EcPrivateKey::new(curve, sec1.private_key.as_bytes(), public_key)
}

fn dsa_parameters(params: Option<AnyRef<'_>>) -> std::result::Result<DsaParameters, DecodeError> {
    let params = params.ok_or(DecodeError::MissingParameters("DSA domain parameters"))?;
    DsaParameters::from_der(&params.decode_as::<DssParmsDer<'_>>()?)
}

fn dh_parameters(params: Option<AnyRef<'_>>) -> std::result::Result<DhParameters, DecodeError> {
    let params = params.ok_or(DecodeError::MissingParameters("DH parameters"))?;
    DhParameters::from_der(&params.decode_as::<DhParameterDer<'_>>()?)
}

fn ec_curve(params: Option<AnyRef<'_>>) -> std::result::Result<NamedCurve, DecodeError> {
    let params = params.ok_or(DecodeError::MissingParameters("EC domain parameters"))?;
    NamedCurve::from_parameters(params)
}
