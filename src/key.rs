//! # Public Key Material
//!
//! Raw public key bytes tagged with the algorithm they belong to. The
//! algorithm determines the verification method type written into events.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use ed25519_dalek::{VerifyingKey, PUBLIC_KEY_LENGTH};

use crate::error::Error;
use crate::hashing;

/// Verification method type for Ed25519 keys.
pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";

/// Verification method type for secp256k1 keys.
pub const ECDSA_SECP256K1_VERIFICATION_KEY_2019: &str = "EcdsaSecp256k1VerificationKey2019";

/// Signature algorithms supported for DID keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// Ed25519 (32-byte public keys).
    #[default]
    Ed25519,

    /// ECDSA over secp256k1 (33-byte compressed public keys).
    Secp256k1,
}

impl KeyAlgorithm {
    /// The verification method type associated with keys of this algorithm.
    #[must_use]
    pub const fn verification_method_type(&self) -> &'static str {
        match self {
            Self::Ed25519 => ED25519_VERIFICATION_KEY_2018,
            Self::Secp256k1 => ECDSA_SECP256K1_VERIFICATION_KEY_2019,
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = Error;

    /// Resolve an algorithm from its verification method type.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            ED25519_VERIFICATION_KEY_2018 => Ok(Self::Ed25519),
            ECDSA_SECP256K1_VERIFICATION_KEY_2019 => Ok(Self::Secp256k1),
            _ => Err(Error::InvalidPublicKey(format!("unsupported verification method type: {s}"))),
        }
    }
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verification_method_type())
    }
}

/// A public key: raw bytes plus the algorithm they are valid for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    algorithm: KeyAlgorithm,
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Create a public key from raw bytes, checking they form a valid key for
    /// `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid public key.
    pub fn from_bytes(algorithm: KeyAlgorithm, bytes: &[u8]) -> crate::Result<Self> {
        match algorithm {
            KeyAlgorithm::Ed25519 => {
                let key_bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
                    Error::InvalidPublicKey(format!("public key is not {PUBLIC_KEY_LENGTH} bytes"))
                })?;
                VerifyingKey::from_bytes(&key_bytes)
                    .map_err(|e| Error::InvalidPublicKey(format!("issue decoding key: {e}")))?;
            }
            KeyAlgorithm::Secp256k1 => {
                k256::PublicKey::from_sec1_bytes(bytes)
                    .map_err(|e| Error::InvalidPublicKey(format!("issue decoding key: {e}")))?;
            }
        }

        Ok(Self {
            algorithm,
            bytes: bytes.to_vec(),
        })
    }

    /// Create a public key from a base58btc string (no multibase prefix).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not base58 or the decoded bytes are
    /// not a valid public key.
    pub fn from_base58(algorithm: KeyAlgorithm, s: &str) -> crate::Result<Self> {
        let bytes = hashing::base58_decode(s)
            .map_err(|e| Error::InvalidPublicKey(format!("issue decoding key: {}", e.message())))?;
        Self::from_bytes(algorithm, &bytes)
    }

    /// The key's algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// The raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The verification method type for this key.
    #[must_use]
    pub const fn verification_method_type(&self) -> &'static str {
        self.algorithm.verification_method_type()
    }

    /// The raw key bytes encoded as base58btc.
    #[must_use]
    pub fn to_base58(&self) -> String {
        hashing::base58_encode(&self.bytes)
    }

    /// The raw key bytes encoded as a base58btc multibase string.
    #[must_use]
    pub fn to_multibase(&self) -> String {
        hashing::multibase_encode(&self.bytes)
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        Self {
            algorithm: KeyAlgorithm::Ed25519,
            bytes: key.to_bytes().to_vec(),
        }
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self::from(&key)
    }
}

impl From<&k256::PublicKey> for PublicKey {
    fn from(key: &k256::PublicKey) -> Self {
        use k256::elliptic_curve::sec1::ToEncodedPoint;

        Self {
            algorithm: KeyAlgorithm::Secp256k1,
            bytes: key.to_encoded_point(true).as_bytes().to_vec(),
        }
    }
}
