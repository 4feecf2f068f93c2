//! # DID Owner Event
//!
//! Sets the DID root key and the DID that controls it. Published when a DID
//! is created and whenever ownership is transferred.

use serde_json::{json, Map, Value};

use super::{
    decode_public_key, field, key_type_field, require, DidEvent, EventTarget, IdFormat,
};
use crate::error::Error;
use crate::key::PublicKey;

const ARGS: &str = "DID Owner";

/// Event setting the DID root key: `{did}#did-root-key`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidOwnerEvent {
    id: String,
    controller: String,
    public_key: PublicKey,
}

impl DidOwnerEvent {
    /// Create a new owner event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArguments`] if `id` or `controller` is empty,
    /// then [`Error::InvalidId`] if `id` is not `{did}#did-root-key`.
    pub fn new(
        id: impl Into<String>, controller: impl Into<String>, public_key: PublicKey,
    ) -> crate::Result<Self> {
        let id = id.into();
        let controller = controller.into();
        require(ARGS, &[id.as_str(), controller.as_str()])?;
        IdFormat::RootKey.validate(&id)?;

        Ok(Self {
            id,
            controller,
            public_key,
        })
    }

    /// Rebuild an owner event from the object held under the `DIDOwner` key
    /// of an event tree.
    ///
    /// # Errors
    ///
    /// Fails as [`DidOwnerEvent::new`] does. A `type` that is present but not
    /// a string is [`Error::MissingArguments`]. An unknown `type` or a key
    /// that does not decode is [`Error::InvalidPublicKey`].
    pub fn from_json_tree(tree: &Value) -> crate::Result<Self> {
        let (Some(id), Some(controller), Some(public_key_base58)) =
            (field(tree, "id"), field(tree, "controller"), field(tree, "publicKeyBase58"))
        else {
            return Err(Error::MissingArguments(ARGS));
        };
        let key_type = key_type_field(ARGS, tree)?;
        IdFormat::RootKey.validate(id)?;

        // the key is decoded after the id so a bad id is reported first
        let public_key = decode_public_key(key_type, public_key_base58)?;

        Ok(Self {
            id: id.to_string(),
            controller: controller.to_string(),
            public_key,
        })
    }

    /// The DID controlling the root key.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The DID root key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The root key encoded as base58btc.
    #[must_use]
    pub fn public_key_base58(&self) -> String {
        self.public_key.to_base58()
    }
}

impl DidEvent for DidOwnerEvent {
    fn target(&self) -> EventTarget {
        EventTarget::DidOwner
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
        body.insert("type".into(), json!(self.event_type()));
        body.insert("controller".into(), json!(self.controller));
        body.insert("publicKeyBase58".into(), json!(self.public_key_base58()));
        body
    }
}
