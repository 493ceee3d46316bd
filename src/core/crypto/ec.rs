//! Elliptic curve domain parameters and point handling.
//!
//! Only NIST P-256 is supported. Points and scalars are validated with `p256`
//! before they are exposed as plain coordinates.

use std::fmt;

use const_oid::ObjectIdentifier;
use der::asn1::AnyRef;
use der::{Tag, Tagged};
use hex_literal::hex;
use num_bigint::BigUint;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use tracing::trace;

use super::asn1::{self, SpecifiedCurveDer};
use crate::error::DecodeError;

/// secp256r1 / prime256v1
pub(crate) const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
/// prime-field (X9.62)
const PRIME_FIELD: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.1.1");

const P256_P: [u8; 32] = hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
const P256_A: [u8; 32] = hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc");
const P256_B: [u8; 32] = hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
const P256_GX: [u8; 32] = hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
const P256_GY: [u8; 32] = hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");
const P256_N: [u8; 32] = hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

/// A supported named curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    P256,
}

/// Short Weierstrass domain parameters `y^2 = x^3 + ax + b` over GF(p).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParameters {
    pub field_prime: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub generator: EcPoint,
    pub order: BigUint,
    pub cofactor: u32,
}

/// An affine curve point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl NamedCurve {
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
        }
    }

    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Self::P256 => SECP256R1,
        }
    }

    /// Size of the curve's field elements in bits.
    pub fn bits(&self) -> u64 {
        match self {
            Self::P256 => 256,
        }
    }

    pub fn parameters(&self) -> CurveParameters {
        match self {
            Self::P256 => CurveParameters {
                field_prime: BigUint::from_bytes_be(&P256_P),
                a: BigUint::from_bytes_be(&P256_A),
                b: BigUint::from_bytes_be(&P256_B),
                generator: EcPoint {
                    x: BigUint::from_bytes_be(&P256_GX),
                    y: BigUint::from_bytes_be(&P256_GY),
                },
                order: BigUint::from_bytes_be(&P256_N),
                cofactor: 1,
            },
        }
    }

    /// The order of the generator point.
    pub fn order(&self) -> BigUint {
        self.parameters().order
    }

    pub(crate) fn from_oid(oid: &ObjectIdentifier) -> Result<Self, DecodeError> {
        match *oid {
            SECP256R1 => Ok(Self::P256),
            _ => Err(DecodeError::UnsupportedCurve(oid.to_string())),
        }
    }

    /// Resolve `ECParameters`: a named curve OID or explicit domain parameters.
    pub(crate) fn from_parameters(params: AnyRef<'_>) -> Result<Self, DecodeError> {
        match params.tag() {
            Tag::ObjectIdentifier => Self::from_oid(&params.decode_as::<ObjectIdentifier>()?),
            Tag::Sequence => Self::from_specified(&params.decode_as::<SpecifiedCurveDer<'_>>()?),
            Tag::Null => Err(DecodeError::UnsupportedCurve("implicitCA".to_string())),
            tag => Err(DecodeError::UnsupportedCurve(format!("parameters tagged {}", tag))),
        }
    }

    /// Match explicit parameters against the supported curves.
    fn from_specified(spec: &SpecifiedCurveDer<'_>) -> Result<Self, DecodeError> {
        if spec.field_id.field_type != PRIME_FIELD {
            return Err(DecodeError::UnsupportedCurve(format!(
                "field type {}",
                spec.field_id.field_type
            )));
        }

        let curve = Self::P256;
        let known = curve.parameters();
        let same_curve = asn1::uint(&spec.field_id.prime) == known.field_prime
            && BigUint::from_bytes_be(spec.curve.a.as_bytes()) == known.a
            && BigUint::from_bytes_be(spec.curve.b.as_bytes()) == known.b
            && asn1::uint(&spec.order) == known.order;
        if !same_curve {
            return Err(DecodeError::UnsupportedCurve("explicit parameters".to_string()));
        }

        let base = curve.decode_point(spec.base.as_bytes())?;
        if base != known.generator {
            return Err(DecodeError::UnsupportedCurve(
                "explicit parameters with a non-standard generator".to_string(),
            ));
        }

        trace!(curve = curve.name(), "explicit curve parameters matched");
        Ok(curve)
    }

    /// Decode and validate a SEC1-encoded point (compressed or uncompressed).
    pub(crate) fn decode_point(&self, bytes: &[u8]) -> Result<EcPoint, DecodeError> {
        match self {
            Self::P256 => {
                let point = p256::PublicKey::from_sec1_bytes(bytes)
                    .map_err(|_| DecodeError::InvalidKey("point is not on P-256".to_string()))?;
                affine(&point)
            }
        }
    }

    /// Validate a private scalar and derive its public point.
    pub(crate) fn public_point(&self, scalar: &[u8]) -> Result<EcPoint, DecodeError> {
        match self {
            Self::P256 => {
                let secret = p256::SecretKey::from_slice(scalar).map_err(|_| {
                    DecodeError::InvalidKey("private scalar out of range for P-256".to_string())
                })?;
                affine(&secret.public_key())
            }
        }
    }
}

fn affine(point: &p256::PublicKey) -> Result<EcPoint, DecodeError> {
    let encoded = point.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(EcPoint {
            x: BigUint::from_bytes_be(x),
            y: BigUint::from_bytes_be(y),
        }),
        _ => Err(DecodeError::InvalidKey("point at infinity".to_string())),
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
