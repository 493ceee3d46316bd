//! Algorithm identifier classification.

use std::fmt;

use const_oid::ObjectIdentifier;

use crate::error::DecodeError;

/// rsaEncryption (PKCS#1)
pub(crate) const RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
/// id-dsa (X9.57)
pub(crate) const ID_DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
/// id-ecPublicKey (X9.62)
pub(crate) const ID_EC_PUBLIC_KEY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
/// dhKeyAgreement (PKCS#3)
pub(crate) const DH_KEY_AGREEMENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.3.1");

/// Key algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Rsa,
    Dsa,
    Ec,
    DiffieHellman,
}

impl Algorithm {
    /// Classify an algorithm identifier OID.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedAlgorithm` for any other OID.
    pub(crate) fn from_oid(oid: &ObjectIdentifier) -> Result<Self, DecodeError> {
        match *oid {
            RSA_ENCRYPTION => Ok(Self::Rsa),
            ID_DSA => Ok(Self::Dsa),
            ID_EC_PUBLIC_KEY => Ok(Self::Ec),
            DH_KEY_AGREEMENT => Ok(Self::DiffieHellman),
            _ => Err(DecodeError::UnsupportedAlgorithm(oid.to_string())),
        }
    }

    /// Display name, as used by most crypto tooling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ec => "EC",
            Self::DiffieHellman => "DH",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
