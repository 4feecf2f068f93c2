//! # Hedera DID Identifiers
//!
//! Parse and compose `did:hedera` identifiers of the form
//!
//! `did:hedera:<network>:z<base58 public key>_<shard>.<realm>.<num>`
//!
//! where the trailing entity id is the consensus topic the DID's events are
//! published on.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;
use crate::hashing;
use crate::key::PublicKey;

/// The DID method name.
pub const METHOD: &str = "hedera";

/// Hedera networks a DID can live on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    Mainnet,

    /// Public test network.
    #[default]
    Testnet,

    /// Preview network.
    Previewnet,
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "previewnet" => Ok(Self::Previewnet),
            _ => Err(Error::InvalidDid(format!("unsupported network: {s}"))),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Previewnet => write!(f, "previewnet"),
        }
    }
}

/// A ledger entity id (`shard.realm.num`) identifying a consensus topic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TopicId {
    /// Shard number.
    pub shard: u64,

    /// Realm number.
    pub realm: u64,

    /// Entity number.
    pub num: u64,
}

impl TopicId {
    /// Create a topic id from its components.
    #[must_use]
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl FromStr for TopicId {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let parts = s.split('.').collect::<Vec<_>>();
        let [shard, realm, num] = parts.as_slice() else {
            return Err(Error::InvalidDid(format!("topic id must be shard.realm.num: {s}")));
        };
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidDid(format!("invalid topic id: {s}")));
            }
            part.parse::<u64>().map_err(|e| Error::InvalidDid(format!("invalid topic id {s}: {e}")))
        };

        Ok(Self {
            shard: parse(*shard)?,
            realm: parse(*realm)?,
            num: parse(*num)?,
        })
    }
}

impl Display for TopicId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

/// A parsed `did:hedera` identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HederaDid {
    /// Network the DID is registered on.
    pub network: Network,

    /// The DID root public key, multibase (base58btc) encoded.
    pub public_key_multibase: String,

    /// Topic the DID's events are published to.
    pub topic_id: TopicId,
}

impl HederaDid {
    /// Compose a DID from its root public key and topic.
    #[must_use]
    pub fn new(network: Network, public_key: &PublicKey, topic_id: TopicId) -> Self {
        Self {
            network,
            public_key_multibase: public_key.to_multibase(),
            topic_id,
        }
    }

    /// Append a fragment to the DID, e.g. `service-1`.
    #[must_use]
    pub fn with_fragment(&self, fragment: &str) -> String {
        format!("{self}#{fragment}")
    }

    /// The raw bytes of the DID root public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored multibase value does not decode.
    pub fn public_key_bytes(&self) -> crate::Result<Vec<u8>> {
        hashing::multibase_decode(&self.public_key_multibase)
    }
}

impl FromStr for HederaDid {
    type Err = Error;

    /// Parse a `did:hedera` identifier. The string must not contain a
    /// fragment.
    fn from_str(s: &str) -> crate::Result<Self> {
        let parts = s.split(':').collect::<Vec<_>>();
        let ["did", method, network, id] = parts.as_slice() else {
            return Err(Error::InvalidDid(format!("DID string is invalid: {s}")));
        };
        if *method != METHOD {
            return Err(Error::InvalidDid(format!("DID method must be '{METHOD}': {s}")));
        }
        let network = Network::from_str(network)?;

        let Some((public_key_multibase, topic_id)) = id.split_once('_') else {
            return Err(Error::InvalidDid(format!("missing topic id: {s}")));
        };
        if hashing::multibase_decode(public_key_multibase)
            .map_err(|e| Error::InvalidDid(format!("invalid public key in {s}: {}", e.message())))?
            .is_empty()
        {
            return Err(Error::InvalidDid(format!("empty public key: {s}")));
        }
        let topic_id = TopicId::from_str(topic_id)?;

        Ok(Self {
            network,
            public_key_multibase: public_key_multibase.to_string(),
            topic_id,
        })
    }
}

impl Display for HederaDid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "did:{METHOD}:{}:{}_{}", self.network, self.public_key_multibase, self.topic_id)
    }
}

/// Split a DID URL of the form `<did>#<fragment>` into its parsed DID and
/// fragment.
///
/// # Errors
///
/// Returns an error if there is no fragment or the DID does not parse.
pub fn parse_did_url(url: &str) -> crate::Result<(HederaDid, &str)> {
    let Some((did, fragment)) = url.split_once('#') else {
        return Err(Error::InvalidDid(format!("missing fragment: {url}")));
    };
    if did.is_empty() || fragment.is_empty() {
        return Err(Error::InvalidDid(format!("DID URL is invalid: {url}")));
    }
    Ok((HederaDid::from_str(did)?, fragment))
}

#[cfg(test)]
mod test {
    use super::*;

    const DID: &str =
        "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.29613327";

    #[test]
    fn parse_and_compose() {
        let did = HederaDid::from_str(DID).expect("should parse");
        assert_eq!(did.network, Network::Testnet);
        assert_eq!(did.public_key_multibase, "zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC");
        assert_eq!(did.topic_id, TopicId::new(0, 0, 29_613_327));
        assert_eq!(did.public_key_bytes().expect("should decode").len(), 32);
        assert_eq!(did.to_string(), DID);
        assert_eq!(did.with_fragment("service-1"), format!("{DID}#service-1"));
    }

    #[test]
    fn reject_malformed() {
        let cases = [
            "did:hedera:testnet",
            "did:web:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.1",
            "did:hedera:devnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.1",
            "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC",
            "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0",
            "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.x",
            "did:hedera:testnet:AEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.1",
            "did:hedera:testnet:z_0.0.1",
            "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.1#did-root-key",
        ];
        for case in cases {
            let err = HederaDid::from_str(case).expect_err(case);
            assert!(matches!(err, Error::InvalidDid(_)), "{case}: {err}");
        }
    }

    #[test]
    fn did_url() {
        let url = format!("{DID}#did-root-key");
        let (did, fragment) = parse_did_url(&url).expect("should parse DID URL");
        assert_eq!(did.to_string(), DID);
        assert_eq!(fragment, "did-root-key");

        assert!(parse_did_url(DID).is_err());
        assert!(parse_did_url(&format!("{DID}#")).is_err());
    }
}
