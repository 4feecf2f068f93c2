//! # Verification Relationship Event
//!
//! Binds a key to one of the DID document's verification relationships.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{
    decode_public_key, field, key_type_field, require, DidEvent, EventTarget, IdFormat,
};
use crate::error::Error;
use crate::key::PublicKey;

const ARGS: &str = "Verification Relationship";

/// The verification relationship a key is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipType {
    /// The document's `authentication` field.
    Authentication,

    /// The document's `assertionMethod` field.
    AssertionMethod,

    /// The document's `keyAgreement` field.
    KeyAgreement,

    /// The document's `capabilityInvocation` field.
    CapabilityInvocation,

    /// The document's `capabilityDelegation` field.
    CapabilityDelegation,
}

impl RelationshipType {
    /// The relationship name as it appears in a DID document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::AssertionMethod => "assertionMethod",
            Self::KeyAgreement => "keyAgreement",
            Self::CapabilityInvocation => "capabilityInvocation",
            Self::CapabilityDelegation => "capabilityDelegation",
        }
    }
}

impl FromStr for RelationshipType {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "authentication" => Ok(Self::Authentication),
            "assertionMethod" => Ok(Self::AssertionMethod),
            "keyAgreement" => Ok(Self::KeyAgreement),
            "capabilityInvocation" => Ok(Self::CapabilityInvocation),
            "capabilityDelegation" => Ok(Self::CapabilityDelegation),
            _ => Err(Error::InvalidArgument(format!("unsupported relationship type: {s}"))),
        }
    }
}

impl Display for RelationshipType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event binding a key to a verification relationship: `{did}#key-{integer}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRelationshipEvent {
    id: String,
    relationship_type: RelationshipType,
    controller: String,
    public_key: PublicKey,
}

impl VerificationRelationshipEvent {
    /// Create a new verification relationship event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArguments`] if `id` or `controller` is empty,
    /// then [`Error::InvalidId`] if `id` is not `{did}#key-{integer}`.
    pub fn new(
        id: impl Into<String>, relationship_type: RelationshipType, controller: impl Into<String>,
        public_key: PublicKey,
    ) -> crate::Result<Self> {
        let id = id.into();
        let controller = controller.into();
        require(ARGS, &[id.as_str(), controller.as_str()])?;
        IdFormat::Key.validate(&id)?;

        Ok(Self {
            id,
            relationship_type,
            controller,
            public_key,
        })
    }

    /// Rebuild the event from the object held under the
    /// `VerificationRelationship` key of an event tree.
    ///
    /// # Errors
    ///
    /// Fails as [`VerificationRelationshipEvent::new`] does, with
    /// [`Error::InvalidArgument`] for an unknown relationship type, or with
    /// [`Error::InvalidPublicKey`] if the key does not decode.
    pub fn from_json_tree(tree: &Value) -> crate::Result<Self> {
        let (Some(id), Some(relationship_type), Some(controller), Some(public_key_base58)) = (
            field(tree, "id"),
            field(tree, "relationshipType"),
            field(tree, "controller"),
            field(tree, "publicKeyBase58"),
        ) else {
            return Err(Error::MissingArguments(ARGS));
        };
        let key_type = key_type_field(ARGS, tree)?;
        IdFormat::Key.validate(id)?;

        // values are checked after the id so a bad id is reported first
        let relationship_type = RelationshipType::from_str(relationship_type)?;
        let public_key = decode_public_key(key_type, public_key_base58)?;

        Ok(Self {
            id: id.to_string(),
            relationship_type,
            controller: controller.to_string(),
            public_key,
        })
    }

    /// The relationship the key is bound to.
    #[must_use]
    pub const fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    /// The DID controlling the key.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The bound key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The key encoded as base58btc.
    #[must_use]
    pub fn public_key_base58(&self) -> String {
        self.public_key.to_base58()
    }
}

impl DidEvent for VerificationRelationshipEvent {
    fn target(&self) -> EventTarget {
        EventTarget::VerificationRelationship
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn event_type(&self) -> &str {
        self.public_key.verification_method_type()
    }

    fn json_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("id".into(), json!(self.id));
        body.insert("relationshipType".into(), json!(self.relationship_type.as_str()));
        body.insert("type".into(), json!(self.event_type()));
        body.insert("controller".into(), json!(self.controller));
        body.insert("publicKeyBase58".into(), json!(self.public_key_base58()));
        body
    }
}
