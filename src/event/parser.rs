//! # Event Parser
//!
//! Reconstructs events read back from a topic. The top-level key of the event
//! tree selects the target; the operation the event was published under
//! selects between create and update forms of the same shape.

use std::str::FromStr;

use anyhow::anyhow;
use serde_json::{Map, Value};

use super::{
    DidEvent, DidOwnerEvent, EventTarget, Operation, ServiceEvent, VerificationMethodEvent,
    VerificationRelationshipEvent,
};
use crate::error::Error;
use crate::hashing;

/// Any DID event, tagged by the operation it is published under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Sets the root key of a new DID.
    CreateDidOwner(DidOwnerEvent),

    /// Changes the root key or controller of a DID.
    UpdateDidOwner(DidOwnerEvent),

    /// Adds a service endpoint.
    CreateService(ServiceEvent),

    /// Replaces a service endpoint.
    UpdateService(ServiceEvent),

    /// Adds a verification method.
    CreateVerificationMethod(VerificationMethodEvent),

    /// Replaces a verification method.
    UpdateVerificationMethod(VerificationMethodEvent),

    /// Adds a verification relationship.
    CreateVerificationRelationship(VerificationRelationshipEvent),

    /// Replaces a verification relationship.
    UpdateVerificationRelationship(VerificationRelationshipEvent),
}

impl Event {
    /// Rebuild a `create` event from its JSON tree, e.g.
    /// `{"Service": {"id": ..., "type": ..., "serviceEndpoint": ...}}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] if the tree is not an object with a
    /// single key, [`Error::UnknownTarget`] if that key is not a known target,
    /// or the target event's validation error.
    pub fn from_json_tree(tree: &Value) -> crate::Result<Self> {
        Self::parse(Operation::Create, tree)
    }

    /// Rebuild an event published under `operation` from its JSON tree.
    ///
    /// # Errors
    ///
    /// See [`Event::from_json_tree`].
    pub fn parse(operation: Operation, tree: &Value) -> crate::Result<Self> {
        let (name, inner) = single_entry(tree)?;
        let target = EventTarget::from_str(name)?;
        tracing::trace!(%operation, %target, "reconstructing event");

        let event = match (operation, target) {
            (Operation::Create, EventTarget::DidOwner) => {
                Self::CreateDidOwner(DidOwnerEvent::from_json_tree(inner)?)
            }
            (Operation::Update, EventTarget::DidOwner) => {
                Self::UpdateDidOwner(DidOwnerEvent::from_json_tree(inner)?)
            }
            (Operation::Create, EventTarget::Service) => {
                Self::CreateService(ServiceEvent::from_json_tree(inner)?)
            }
            (Operation::Update, EventTarget::Service) => {
                Self::UpdateService(ServiceEvent::from_json_tree(inner)?)
            }
            (Operation::Create, EventTarget::VerificationMethod) => {
                Self::CreateVerificationMethod(VerificationMethodEvent::from_json_tree(inner)?)
            }
            (Operation::Update, EventTarget::VerificationMethod) => {
                Self::UpdateVerificationMethod(VerificationMethodEvent::from_json_tree(inner)?)
            }
            (Operation::Create, EventTarget::VerificationRelationship) => {
                Self::CreateVerificationRelationship(
                    VerificationRelationshipEvent::from_json_tree(inner)?,
                )
            }
            (Operation::Update, EventTarget::VerificationRelationship) => {
                Self::UpdateVerificationRelationship(
                    VerificationRelationshipEvent::from_json_tree(inner)?,
                )
            }
        };

        Ok(event)
    }

    /// Rebuild an event from its compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] if the string is not JSON, otherwise
    /// fails as [`Event::parse`] does.
    pub fn from_json(operation: Operation, json: &str) -> crate::Result<Self> {
        let tree: Value = serde_json::from_str(json)
            .map_err(|e| Error::MalformedEvent(format!("issue deserializing event: {e}")))?;
        Self::parse(operation, &tree)
    }

    /// Rebuild an event from a ledger payload: base64 of the event's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] if the payload is not base64 or does
    /// not hold JSON, otherwise fails as [`Event::parse`] does.
    pub fn from_base64(operation: Operation, payload: &str) -> crate::Result<Self> {
        let bytes = hashing::base64_decode(payload)?;
        let json = String::from_utf8(bytes)
            .map_err(|e| Error::Other(anyhow!("event payload is not UTF-8: {e}")))?;
        Self::from_json(operation, &json)
    }

    /// The operation the event is published under.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::CreateDidOwner(_)
            | Self::CreateService(_)
            | Self::CreateVerificationMethod(_)
            | Self::CreateVerificationRelationship(_) => Operation::Create,
            Self::UpdateDidOwner(_)
            | Self::UpdateService(_)
            | Self::UpdateVerificationMethod(_)
            | Self::UpdateVerificationRelationship(_) => Operation::Update,
        }
    }

    fn inner(&self) -> &dyn DidEvent {
        match self {
            Self::CreateDidOwner(event) | Self::UpdateDidOwner(event) => event,
            Self::CreateService(event) | Self::UpdateService(event) => event,
            Self::CreateVerificationMethod(event) | Self::UpdateVerificationMethod(event) => event,
            Self::CreateVerificationRelationship(event)
            | Self::UpdateVerificationRelationship(event) => event,
        }
    }
}

impl DidEvent for Event {
    fn target(&self) -> EventTarget {
        self.inner().target()
    }

    fn id(&self) -> &str {
        self.inner().id()
    }

    fn event_type(&self) -> &str {
        self.inner().event_type()
    }

    fn json_body(&self) -> Map<String, Value> {
        self.inner().json_body()
    }
}

fn single_entry(tree: &Value) -> crate::Result<(&str, &Value)> {
    let Some(object) = tree.as_object() else {
        return Err(Error::MalformedEvent("event tree is not a JSON object".into()));
    };
    let mut entries = object.iter();
    let (Some((name, inner)), None) = (entries.next(), entries.next()) else {
        return Err(Error::MalformedEvent(format!(
            "event tree must have exactly one target, found {}",
            object.len()
        )));
    };
    Ok((name.as_str(), inner))
}
