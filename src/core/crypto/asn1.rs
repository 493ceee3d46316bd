//! DER structures for the key containers that have no dedicated crate here.
//!
//! Only decoding is used, but `der` derives both directions.

use der::asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef, UintRef};
use der::Sequence;
use num_bigint::BigUint;

/// PKCS#1 `RSAPrivateKey` (RFC 8017, A.1.2). `otherPrimeInfos` is kept opaque
/// so multi-prime keys decode far enough to be rejected by version.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct RsaPrivateKeyDer<'a> {
    pub version: u8,
    pub modulus: UintRef<'a>,
    pub public_exponent: UintRef<'a>,
    pub private_exponent: UintRef<'a>,
    pub prime1: UintRef<'a>,
    pub prime2: UintRef<'a>,
    pub exponent1: UintRef<'a>,
    pub exponent2: UintRef<'a>,
    pub coefficient: UintRef<'a>,
    pub other_prime_infos: Option<AnyRef<'a>>,
}

/// PKCS#1 `RSAPublicKey` (RFC 8017, A.1.1).
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct RsaPublicKeyDer<'a> {
    pub modulus: UintRef<'a>,
    pub public_exponent: UintRef<'a>,
}

/// `Dss-Parms` (RFC 3279, 2.3.2).
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct DssParmsDer<'a> {
    pub p: UintRef<'a>,
    pub q: UintRef<'a>,
    pub g: UintRef<'a>,
}

/// OpenSSL's traditional `DSA PRIVATE KEY` layout.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct DsaPrivateKeyDer<'a> {
    pub version: u8,
    pub p: UintRef<'a>,
    pub q: UintRef<'a>,
    pub g: UintRef<'a>,
    pub y: UintRef<'a>,
    pub x: UintRef<'a>,
}

/// PKCS#3 `DHParameter`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct DhParameterDer<'a> {
    pub p: UintRef<'a>,
    pub g: UintRef<'a>,
    pub private_value_length: Option<UintRef<'a>>,
}

/// SEC1 `ECPrivateKey` (RFC 5915). Parameters stay opaque so both named and
/// explicit curves can be resolved by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct EcPrivateKeyDer<'a> {
    pub version: u8,
    pub private_key: OctetStringRef<'a>,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub parameters: Option<AnyRef<'a>>,
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    pub public_key: Option<BitStringRef<'a>>,
}

/// X9.62 `SpecifiedECDomain`, prime fields only.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct SpecifiedCurveDer<'a> {
    pub version: u8,
    pub field_id: PrimeFieldDer<'a>,
    pub curve: CurveDer<'a>,
    pub base: OctetStringRef<'a>,
    pub order: UintRef<'a>,
    pub cofactor: Option<UintRef<'a>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct PrimeFieldDer<'a> {
    pub field_type: ObjectIdentifier,
    pub prime: UintRef<'a>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub(crate) struct CurveDer<'a> {
    pub a: OctetStringRef<'a>,
    pub b: OctetStringRef<'a>,
    pub seed: Option<BitStringRef<'a>>,
}

/// Big-endian unsigned integer to an arbitrary-precision value.
pub(crate) fn uint(value: &UintRef<'_>) -> BigUint {
    BigUint::from_bytes_be(value.as_bytes())
}
