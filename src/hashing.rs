//! # Encoding Utilities
//!
//! Byte-to-text codecs used for key material and ledger payloads. All
//! functions are pure.

use base64ct::{Base64, Encoding};
use multibase::Base;

use crate::error::Error;

/// Encode bytes as a base58btc multibase string (`z` prefix).
#[must_use]
pub fn multibase_encode(bytes: &[u8]) -> String {
    multibase::encode(Base::Base58Btc, bytes)
}

/// Decode a multibase string. Only base58btc is accepted.
///
/// # Errors
///
/// Returns an error if the string is not valid multibase or uses a base other
/// than base58btc.
pub fn multibase_decode(s: &str) -> crate::Result<Vec<u8>> {
    let (base, bytes) = multibase::decode(s)
        .map_err(|e| Error::MalformedEvent(format!("issue decoding multibase: {e}")))?;
    if base != Base::Base58Btc {
        return Err(Error::MalformedEvent(format!("unsupported multibase encoding: {base:?}")));
    }
    Ok(bytes)
}

/// Encode bytes as base58btc without a multibase prefix.
#[must_use]
pub fn base58_encode(bytes: &[u8]) -> String {
    Base::Base58Btc.encode(bytes)
}

/// Decode a base58btc string that has no multibase prefix.
///
/// # Errors
///
/// Returns an error if the string contains characters outside the base58
/// alphabet.
pub fn base58_decode(s: &str) -> crate::Result<Vec<u8>> {
    Base::Base58Btc
        .decode(s)
        .map_err(|e| Error::MalformedEvent(format!("issue decoding base58: {e}")))
}

/// Encode bytes as standard, padded base64.
#[must_use]
pub fn base64_encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
}

/// Decode standard, padded base64.
///
/// # Errors
///
/// Returns an error if the string is not valid base64.
pub fn base64_decode(s: &str) -> crate::Result<Vec<u8>> {
    Base64::decode_vec(s).map_err(|e| Error::MalformedEvent(format!("issue decoding base64: {e}")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn multibase_prefix() {
        let encoded = multibase_encode(b"hello");
        assert!(encoded.starts_with('z'));
        assert_eq!(&encoded[1..], base58_encode(b"hello"));
        assert_eq!(multibase_decode(&encoded).expect("should decode"), b"hello");
    }

    #[test]
    fn multibase_rejects_other_bases() {
        // base64 multibase prefix
        let encoded = multibase::encode(Base::Base64, b"hello");
        let err = multibase_decode(&encoded).expect_err("should reject base64");
        assert!(matches!(err, Error::MalformedEvent(_)));
    }

    #[test]
    fn base58_alphabet() {
        // '0', 'O', 'I' and 'l' are not in the base58 alphabet
        assert!(base58_decode("0OIl").is_err());
    }

    #[test]
    fn base64_padded() {
        assert_eq!(base64_encode(b"}}"), "fX0=");
        assert_eq!(base64_decode("fX0=").expect("should decode"), b"}}");
        assert!(base64_decode("fX0").is_err());
    }
}
