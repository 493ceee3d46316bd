//! Typed public and private keys.
//!
//! Every numeric field holds exactly the value encoded in the DER input.
//! Public values are [`BigUint`]s. Secret values live in zeroizing byte
//! buffers and are handed out as `BigUint` copies. Private key `Debug` output
//! never includes secret fields.

use std::fmt;

use der::asn1::UintRef;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use super::algorithm::Algorithm;
use super::asn1::{self, DhParameterDer, DsaPrivateKeyDer, DssParmsDer, RsaPrivateKeyDer, RsaPublicKeyDer};
use super::ec::{EcPoint, NamedCurve};
use crate::error::DecodeError;

/// A decoded key, public or private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Public(PublicKey),
    Private(PrivateKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Dsa(DsaPublicKey),
    Ec(EcPublicKey),
    Dh(DhPublicKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Dsa(DsaPrivateKey),
    Ec(EcPrivateKey),
    Dh(DhPrivateKey),
}

impl Key {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Key::Public(key) => key.algorithm(),
            Key::Private(key) => key.algorithm(),
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Key::Private(_))
    }

    /// Key size in bits: modulus for RSA, prime `p` for DSA/DH, field size for EC.
    pub fn bits(&self) -> u64 {
        match self {
            Key::Public(key) => key.bits(),
            Key::Private(key) => key.bits(),
        }
    }

    /// The public half, derived from the private key where necessary.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Key::Public(key) => key.clone(),
            Key::Private(key) => key.public_key(),
        }
    }

    pub fn as_public(&self) -> Option<&PublicKey> {
        match self {
            Key::Public(key) => Some(key),
            Key::Private(_) => None,
        }
    }

    pub fn as_private(&self) -> Option<&PrivateKey> {
        match self {
            Key::Private(key) => Some(key),
            Key::Public(_) => None,
        }
    }
}

impl PublicKey {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            PublicKey::Rsa(_) => Algorithm::Rsa,
            PublicKey::Dsa(_) => Algorithm::Dsa,
            PublicKey::Ec(_) => Algorithm::Ec,
            PublicKey::Dh(_) => Algorithm::DiffieHellman,
        }
    }

    pub fn bits(&self) -> u64 {
        match self {
            PublicKey::Rsa(key) => key.modulus.bits(),
            PublicKey::Dsa(key) => key.params.p.bits(),
            PublicKey::Ec(key) => key.curve.bits(),
            PublicKey::Dh(key) => key.params.p.bits(),
        }
    }
}

impl PrivateKey {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            PrivateKey::Rsa(_) => Algorithm::Rsa,
            PrivateKey::Dsa(_) => Algorithm::Dsa,
            PrivateKey::Ec(_) => Algorithm::Ec,
            PrivateKey::Dh(_) => Algorithm::DiffieHellman,
        }
    }

    pub fn bits(&self) -> u64 {
        match self {
            PrivateKey::Rsa(key) => key.modulus.bits(),
            PrivateKey::Dsa(key) => key.params.p.bits(),
            PrivateKey::Ec(key) => key.curve.bits(),
            PrivateKey::Dh(key) => key.params.p.bits(),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.public_key()),
            PrivateKey::Dsa(key) => PublicKey::Dsa(key.public_key()),
            PrivateKey::Ec(key) => PublicKey::Ec(key.public_key()),
            PrivateKey::Dh(key) => PublicKey::Dh(key.public_key()),
        }
    }
}

// RSA

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: BigUint,
    public_exponent: BigUint,
}

#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    modulus: BigUint,
    public_exponent: BigUint,
    private_exponent: SecretUint,
    prime_p: SecretUint,
    prime_q: SecretUint,
    prime_exponent_p: SecretUint,
    prime_exponent_q: SecretUint,
    crt_coefficient: SecretUint,
}

impl RsaPublicKey {
    pub(crate) fn from_der(der: &RsaPublicKeyDer<'_>) -> Result<Self, DecodeError> {
        let key = Self {
            modulus: asn1::uint(&der.modulus),
            public_exponent: asn1::uint(&der.public_exponent),
        };
        check_rsa(&key.modulus, &key.public_exponent)?;
        Ok(key)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }
}

impl RsaPrivateKey {
    pub(crate) fn from_der(der: &RsaPrivateKeyDer<'_>) -> Result<Self, DecodeError> {
        if der.version != 0 {
            return Err(DecodeError::UnsupportedVersion {
                structure: "RSAPrivateKey",
                version: der.version,
            });
        }

        let key = Self {
            modulus: asn1::uint(&der.modulus),
            public_exponent: asn1::uint(&der.public_exponent),
            private_exponent: SecretUint::from_uint(&der.private_exponent),
            prime_p: SecretUint::from_uint(&der.prime1),
            prime_q: SecretUint::from_uint(&der.prime2),
            prime_exponent_p: SecretUint::from_uint(&der.exponent1),
            prime_exponent_q: SecretUint::from_uint(&der.exponent2),
            crt_coefficient: SecretUint::from_uint(&der.coefficient),
        };
        check_rsa(&key.modulus, &key.public_exponent)?;
        if key.private_exponent.is_zero() {
            return Err(DecodeError::InvalidKey("RSA private exponent is zero".to_string()));
        }
        Ok(key)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    pub fn private_exponent(&self) -> BigUint {
        self.private_exponent.to_biguint()
    }

    pub fn prime_p(&self) -> BigUint {
        self.prime_p.to_biguint()
    }

    pub fn prime_q(&self) -> BigUint {
        self.prime_q.to_biguint()
    }

    pub fn prime_exponent_p(&self) -> BigUint {
        self.prime_exponent_p.to_biguint()
    }

    pub fn prime_exponent_q(&self) -> BigUint {
        self.prime_exponent_q.to_biguint()
    }

    pub fn crt_coefficient(&self) -> BigUint {
        self.crt_coefficient.to_biguint()
    }

    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }
}

fn check_rsa(modulus: &BigUint, public_exponent: &BigUint) -> Result<(), DecodeError> {
    if modulus.bits() < 2 || public_exponent.bits() < 2 {
        return Err(DecodeError::InvalidKey(
            "RSA modulus and public exponent must exceed 1".to_string(),
        ));
    }
    Ok(())
}

// DSA

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey {
    params: DsaParameters,
    y: BigUint,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DsaPrivateKey {
    params: DsaParameters,
    x: SecretUint,
}

impl DsaParameters {
    pub(crate) fn from_der(der: &DssParmsDer<'_>) -> Result<Self, DecodeError> {
        Self::new(asn1::uint(&der.p), asn1::uint(&der.q), asn1::uint(&der.g))
    }

    fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self, DecodeError> {
        let one = BigUint::from(1u8);
        if p <= one || q <= one || g <= one || g >= p {
            return Err(DecodeError::InvalidKey("invalid DSA domain parameters".to_string()));
        }
        Ok(Self { p, q, g })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }
}

impl DsaPublicKey {
    pub(crate) fn new(params: DsaParameters, y: BigUint) -> Result<Self, DecodeError> {
        if y <= BigUint::from(1u8) || y >= params.p {
            return Err(DecodeError::InvalidKey("DSA public value out of range".to_string()));
        }
        Ok(Self { params, y })
    }

    pub fn params(&self) -> &DsaParameters {
        &self.params
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl DsaPrivateKey {
    /// `x` is big-endian.
    pub(crate) fn new(params: DsaParameters, x: &[u8]) -> Result<Self, DecodeError> {
        let x = SecretUint::from_be_bytes(x);
        if x.is_zero() || !x.is_below(&params.q) {
            return Err(DecodeError::InvalidKey("DSA private value out of range".to_string()));
        }
        Ok(Self { params, x })
    }

    /// Decode OpenSSL's `DSA PRIVATE KEY`, checking the embedded `y` against `x`.
    pub(crate) fn from_openssl_der(der: &DsaPrivateKeyDer<'_>) -> Result<Self, DecodeError> {
        if der.version != 0 {
            return Err(DecodeError::UnsupportedVersion {
                structure: "DSAPrivateKey",
                version: der.version,
            });
        }
        let params = DsaParameters::new(asn1::uint(&der.p), asn1::uint(&der.q), asn1::uint(&der.g))?;
        let key = Self::new(params, der.x.as_bytes())?;
        if key.public_key().y != asn1::uint(&der.y) {
            return Err(DecodeError::InvalidKey(
                "DSA public value does not match private value".to_string(),
            ));
        }
        Ok(key)
    }

    pub fn params(&self) -> &DsaParameters {
        &self.params
    }

    pub fn x(&self) -> BigUint {
        self.x.to_biguint()
    }

    /// `y = g^x mod p`
    pub fn public_key(&self) -> DsaPublicKey {
        DsaPublicKey {
            y: self.params.g.modpow(&self.x.to_biguint(), &self.params.p),
            params: self.params.clone(),
        }
    }
}

// Elliptic curve

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    curve: NamedCurve,
    point: EcPoint,
}

#[derive(Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    curve: NamedCurve,
    s: SecretUint,
    public_point: EcPoint,
}

impl EcPublicKey {
    pub(crate) fn from_sec1_point(curve: NamedCurve, bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            curve,
            point: curve.decode_point(bytes)?,
        })
    }

    pub fn curve(&self) -> NamedCurve {
        self.curve
    }

    /// The public point `W`.
    pub fn w(&self) -> &EcPoint {
        &self.point
    }
}

impl EcPrivateKey {
    /// Build from the raw scalar, checking an embedded public point if present.
    pub(crate) fn new(
        curve: NamedCurve,
        scalar: &[u8],
        embedded_point: Option<&[u8]>,
    ) -> Result<Self, DecodeError> {
        let public_point = curve.public_point(scalar)?;
        if let Some(bytes) = embedded_point {
            if curve.decode_point(bytes)? != public_point {
                return Err(DecodeError::InvalidKey(
                    "EC public key does not match private scalar".to_string(),
                ));
            }
        }
        Ok(Self {
            curve,
            s: SecretUint::from_be_bytes(scalar),
            public_point,
        })
    }

    pub fn curve(&self) -> NamedCurve {
        self.curve
    }

    /// The private scalar `S`.
    pub fn s(&self) -> BigUint {
        self.s.to_biguint()
    }

    /// The order of the curve's base point.
    pub fn order(&self) -> BigUint {
        self.curve.order()
    }

    pub fn public_key(&self) -> EcPublicKey {
        EcPublicKey {
            curve: self.curve,
            point: self.public_point.clone(),
        }
    }
}

// Diffie-Hellman

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhParameters {
    p: BigUint,
    g: BigUint,
    private_value_length: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhPublicKey {
    params: DhParameters,
    y: BigUint,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DhPrivateKey {
    params: DhParameters,
    x: SecretUint,
}

impl DhParameters {
    pub(crate) fn from_der(der: &DhParameterDer<'_>) -> Result<Self, DecodeError> {
        let p = asn1::uint(&der.p);
        let g = asn1::uint(&der.g);
        if p <= BigUint::from(2u8) || g <= BigUint::from(1u8) || g >= p {
            return Err(DecodeError::InvalidKey("invalid DH parameters".to_string()));
        }
        let private_value_length = match &der.private_value_length {
            Some(length) => Some(
                u32::try_from(asn1::uint(length))
                    .map_err(|_| DecodeError::InvalidKey("DH private value length too large".to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            p,
            g,
            private_value_length,
        })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Optional length of the private value in bits.
    pub fn private_value_length(&self) -> Option<u32> {
        self.private_value_length
    }
}

impl DhPublicKey {
    pub(crate) fn new(params: DhParameters, y: BigUint) -> Result<Self, DecodeError> {
        if !in_open_range(&y, &params.p) {
            return Err(DecodeError::InvalidKey("DH public value out of range".to_string()));
        }
        Ok(Self { params, y })
    }

    pub fn params(&self) -> &DhParameters {
        &self.params
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl DhPrivateKey {
    /// `x` is big-endian.
    pub(crate) fn new(params: DhParameters, x: &[u8]) -> Result<Self, DecodeError> {
        let x = SecretUint::from_be_bytes(x);
        if x.is_zero() || !x.is_below(&params.p) {
            return Err(DecodeError::InvalidKey("DH private value out of range".to_string()));
        }
        Ok(Self { params, x })
    }

    pub fn params(&self) -> &DhParameters {
        &self.params
    }

    pub fn x(&self) -> BigUint {
        self.x.to_biguint()
    }

    /// `y = g^x mod p`
    pub fn public_key(&self) -> DhPublicKey {
        DhPublicKey {
            y: self.params.g.modpow(&self.x.to_biguint(), &self.params.p),
            params: self.params.clone(),
        }
    }
}

/// A secret integer as minimal big-endian bytes, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
struct SecretUint(Zeroizing<Vec<u8>>);

impl SecretUint {
    fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self(Zeroizing::new(bytes[start..].to_vec()))
    }

    fn from_uint(value: &UintRef<'_>) -> Self {
        Self::from_be_bytes(value.as_bytes())
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// `self < bound`, compared on the bytes so the secret is not copied.
    fn is_below(&self, bound: &BigUint) -> bool {
        let bound = bound.to_bytes_be();
        (self.0.len(), self.0.as_slice()) < (bound.len(), bound.as_slice())
    }

    fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

/// `1 < value < p - 1`
fn in_open_range(value: &BigUint, p: &BigUint) -> bool {
    let one = BigUint::from(1u8);
    *value > one && *value < p - &one
}

// Private keys print their shape only.

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("bits", &self.modulus.bits())
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsaPrivateKey")
            .field("bits", &self.params.p.bits())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DhPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhPrivateKey")
            .field("bits", &self.params.p.bits())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SecretUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretUint").finish_non_exhaustive()
    }
}
