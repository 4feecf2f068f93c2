//! # DID Events
//!
//! A DID event is an atomic, validated description of one mutation to a DID
//! document. Events are published to the DID's consensus topic as the base64
//! encoding of their compact JSON form:
//!
//! ```json
//! {"Service":{"id":"did:hedera:testnet:z..._0.0.1#service-1","type":"DIDCommMessaging","serviceEndpoint":"https://example.com"}}
//! ```
//!
//! The top-level key names the [`EventTarget`]. Field order inside the target
//! object is fixed per event type and is part of the wire format: ledger
//! consumers may compare raw bytes.

mod owner;
mod parser;
mod service;
mod verification_method;
mod verification_relationship;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::owner::DidOwnerEvent;
pub use self::parser::Event;
pub use self::service::ServiceEvent;
pub use self::verification_method::VerificationMethodEvent;
pub use self::verification_relationship::{RelationshipType, VerificationRelationshipEvent};
use crate::did::parse_did_url;
use crate::error::Error;
use crate::hashing;
use crate::key::{KeyAlgorithm, PublicKey};

/// The section of a DID document an event mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum EventTarget {
    /// The DID root key and its controller.
    #[serde(rename = "DIDOwner")]
    DidOwner,

    /// A service endpoint.
    Service,

    /// A verification method.
    VerificationMethod,

    /// A verification relationship (authentication, key agreement, etc.).
    VerificationRelationship,
}

impl EventTarget {
    /// The tag used as the top-level key of the event's JSON tree.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DidOwner => "DIDOwner",
            Self::Service => "Service",
            Self::VerificationMethod => "VerificationMethod",
            Self::VerificationRelationship => "VerificationRelationship",
        }
    }
}

impl FromStr for EventTarget {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "DIDOwner" => Ok(Self::DidOwner),
            "Service" => Ok(Self::Service),
            "VerificationMethod" => Ok(Self::VerificationMethod),
            "VerificationRelationship" => Ok(Self::VerificationRelationship),
            _ => Err(Error::UnknownTarget(s.to_string())),
        }
    }
}

impl Display for EventTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ledger operation an event is published under.
///
/// Only operations that carry a full event body are represented. A revoke
/// message names an id and nothing else, and removing the entry is left to
/// whoever folds events into a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Adds a new entry to the document.
    #[default]
    Create,

    /// Replaces an existing entry.
    Update,
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "revoke" | "delete" => {
                Err(Error::InvalidArgument(format!("{s} does not carry a DID event body")))
            }
            _ => Err(Error::InvalidArgument(format!("unsupported operation: {s}"))),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Behaviour shared by every DID event.
///
/// Implementors supply the event's fields; serialization to the canonical
/// tree, compact JSON and base64 payload is provided.
pub trait DidEvent {
    /// The document section this event mutates.
    fn target(&self) -> EventTarget;

    /// The event id, a DID URL.
    fn id(&self) -> &str;

    /// The semantic type of the entry, e.g. `Ed25519VerificationKey2018`.
    fn event_type(&self) -> &str;

    /// The event's fields as a JSON object, in wire order.
    fn json_body(&self) -> Map<String, Value>;

    /// The canonical JSON tree: the body keyed by the target tag.
    fn to_json_tree(&self) -> Value {
        let mut tree = Map::new();
        tree.insert(self.target().to_string(), Value::Object(self.json_body()));
        Value::Object(tree)
    }

    /// The compact JSON string published to the ledger.
    fn to_json(&self) -> String {
        self.to_json_tree().to_string()
    }

    /// Base64 of the UTF-8 bytes of [`DidEvent::to_json`]. This is the
    /// ledger payload.
    fn base64(&self) -> String {
        hashing::base64_encode(self.to_json().as_bytes())
    }
}

static SERVICE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^service-[0-9]+$").expect("service fragment regex is valid"));
static KEY_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^key-[0-9]+$").expect("key fragment regex is valid"));

/// Fragment required of an event id.
#[derive(Clone, Copy, Debug)]
pub(crate) enum IdFormat {
    /// `{did}#did-root-key`
    RootKey,

    /// `{did}#service-{integer}`
    Service,

    /// `{did}#key-{integer}`
    Key,
}

impl IdFormat {
    const fn expected(self) -> &'static str {
        match self {
            Self::RootKey => "{did}#did-root-key",
            Self::Service => "{did}#service-{integer}",
            Self::Key => "{did}#key-{integer}",
        }
    }

    fn matches(self, fragment: &str) -> bool {
        match self {
            Self::RootKey => fragment == "did-root-key",
            Self::Service => SERVICE_FRAGMENT.is_match(fragment),
            Self::Key => KEY_FRAGMENT.is_match(fragment),
        }
    }

    /// Check `id` is a Hedera DID followed by the required fragment.
    pub(crate) fn validate(self, id: &str) -> crate::Result<()> {
        let valid = parse_did_url(id).is_ok_and(|(_, fragment)| self.matches(fragment));
        if !valid {
            tracing::debug!(id, expected = self.expected(), "event id is invalid");
            return Err(Error::InvalidId(self.expected()));
        }
        Ok(())
    }
}

/// Fail with [`Error::MissingArguments`] if any argument is empty.
pub(crate) fn require(group: &'static str, args: &[&str]) -> crate::Result<()> {
    if args.iter().any(|arg| arg.is_empty()) {
        tracing::debug!(group, "event arguments are missing");
        return Err(Error::MissingArguments(group));
    }
    Ok(())
}

/// A non-empty string field of an event tree.
pub(crate) fn field<'a>(tree: &'a Value, name: &str) -> Option<&'a str> {
    tree.get(name).and_then(Value::as_str).filter(|value| !value.is_empty())
}

/// The `type` field of a key-bearing event tree, or `None` if the tree has
/// no `type`. A `type` that is present but empty or not a string counts as
/// missing.
pub(crate) fn key_type_field<'a>(
    group: &'static str, tree: &'a Value,
) -> crate::Result<Option<&'a str>> {
    let Some(value) = tree.get("type") else {
        return Ok(None);
    };
    match value.as_str().filter(|key_type| !key_type.is_empty()) {
        Some(key_type) => Ok(Some(key_type)),
        None => {
            tracing::debug!(group, %value, "key type is not a string");
            Err(Error::MissingArguments(group))
        }
    }
}

/// Decode the public key of a key-bearing event. No `type` means Ed25519;
/// an unrecognised `type` is an error.
pub(crate) fn decode_public_key(
    key_type: Option<&str>, public_key_base58: &str,
) -> crate::Result<PublicKey> {
    let algorithm = key_type.map_or(Ok(KeyAlgorithm::Ed25519), KeyAlgorithm::from_str)?;
    PublicKey::from_base58(algorithm, public_key_base58)
}

#[cfg(test)]
mod test {
    use super::*;

    const DID: &str =
        "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.29613327";

    #[test]
    fn target_tags() {
        for target in [
            EventTarget::DidOwner,
            EventTarget::Service,
            EventTarget::VerificationMethod,
            EventTarget::VerificationRelationship,
        ] {
            assert_eq!(EventTarget::from_str(target.as_str()).expect("should parse"), target);
            assert_eq!(
                serde_json::to_value(target).expect("should serialize"),
                Value::String(target.to_string())
            );
        }

        let err = EventTarget::from_str("DIDDocument").expect_err("should be unknown");
        assert!(matches!(err, Error::UnknownTarget(name) if name == "DIDDocument"));
    }

    #[test]
    fn operations() {
        assert_eq!(Operation::from_str("update").expect("should parse"), Operation::Update);
        assert_eq!(Operation::Create.to_string(), "create");

        let err = Operation::from_str("revoke").expect_err("should reject");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(err.message(), "revoke does not carry a DID event body");

        let err = Operation::from_str("merge").expect_err("should reject");
        assert_eq!(err.message(), "unsupported operation: merge");
    }

    #[test]
    fn id_formats() {
        IdFormat::RootKey.validate(&format!("{DID}#did-root-key")).expect("should be valid");
        IdFormat::Service.validate(&format!("{DID}#service-12")).expect("should be valid");
        IdFormat::Key.validate(&format!("{DID}#key-0")).expect("should be valid");

        let invalid = [
            (IdFormat::RootKey, format!("{DID}#key-1")),
            (IdFormat::Service, format!("{DID}#service-")),
            (IdFormat::Service, format!("{DID}#service-1a")),
            (IdFormat::Service, "did:web:example.com#service-1".to_string()),
            (IdFormat::Key, format!("{DID}#key-1#key-2")),
            (IdFormat::Key, DID.to_string()),
        ];
        for (format, id) in invalid {
            let err = format.validate(&id).expect_err(&id);
            assert_eq!(err.to_string(), format!("Event ID is invalid. Expected format: {}", format.expected()));
        }
    }

    #[test]
    fn required_fields() {
        let tree = serde_json::json!({"id": "x", "type": "", "count": 1});
        assert_eq!(field(&tree, "id"), Some("x"));
        assert_eq!(field(&tree, "type"), None);
        assert_eq!(field(&tree, "count"), None);
        assert_eq!(field(&tree, "missing"), None);

        assert!(matches!(
            key_type_field("DID Owner", &tree),
            Err(Error::MissingArguments("DID Owner"))
        ));
        assert_eq!(key_type_field("DID Owner", &tree["missing"]).expect("should be absent"), None);
        let tree = serde_json::json!({"type": "Ed25519VerificationKey2018"});
        assert_eq!(
            key_type_field("DID Owner", &tree).expect("should be present"),
            Some("Ed25519VerificationKey2018")
        );
        let tree = serde_json::json!({"type": null});
        assert!(matches!(
            key_type_field("DID Owner", &tree),
            Err(Error::MissingArguments("DID Owner"))
        ));

        assert!(require("Services", &["a", "b"]).is_ok());
        let err = require("Services", &["a", ""]).expect_err("should be missing");
        assert_eq!(err.to_string(), "Validation failed. Services args are missing");
    }
}
