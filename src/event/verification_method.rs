//! # Verification Method Event

use serde_json::{json, Map, Value};

use super::{
    decode_public_key, field, key_type_field, require, DidEvent, EventTarget, IdFormat,
};
use crate::error::Error;
use crate::key::PublicKey;

const ARGS: &str = "Verification Method";

/// Event adding or replacing a verification method: `{did}#key-{integer}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationMethodEvent {
    id: String,
    controller: String,
    public_key: PublicKey,
}

impl VerificationMethodEvent {
    /// Create a new verification method event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArguments`] if `id` or `controller` is empty,
    /// then [`Error::InvalidId`] if `id` is not `{did}#key-{integer}`.
    pub fn new(
        id: impl Into<String>, controller: impl Into<String>, public_key: PublicKey,
    ) -> crate::Result<Self> {
        let id = id.into();
        let controller = controller.into();
        require(ARGS, &[id.as_str(), controller.as_str()])?;
        IdFormat::Key.validate(&id)?;

        Ok(Self {
            id,
            controller,
            public_key,
        })
    }

    /// Rebuild the event from the object held under the `VerificationMethod`
    /// key of an event tree.
    ///
    /// # Errors
    ///
    /// Fails as [`VerificationMethodEvent::new`] does, or with
    /// [`Error::InvalidPublicKey`] if the key does not decode.
    pub fn from_json_tree(tree: &Value) -> crate::Result<Self> {
        let (Some(id), Some(controller), Some(public_key_base58)) =
            (field(tree, "id"), field(tree, "controller"), field(tree, "publicKeyBase58"))
        else {
            return Err(Error::MissingArguments(ARGS));
        };
        let key_type = key_type_field(ARGS, tree)?;
        IdFormat::Key.validate(id)?;

        // the key is decoded after the id so a bad id is reported first
        let public_key = decode_public_key(key_type, public_key_base58)?;

        Ok(Self {
            id: id.to_string(),
            controller: controller.to_string(),
            public_key,
        })
    }

    /// The DID controlling the key.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The verification key.
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

impl DidEvent for VerificationMethodEvent {
    fn target(&self) -> EventTarget {
        EventTarget::VerificationMethod
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
