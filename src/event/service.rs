//! # Service Event
//!
//! Adds or replaces a service endpoint on the DID document.

use serde_json::{json, Map, Value};

use super::{field, require, DidEvent, EventTarget, IdFormat};
use crate::error::Error;

const ARGS: &str = "Services";

/// Event describing a service endpoint: `{did}#service-{integer}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEvent {
    id: String,
    service_type: String,
    service_endpoint: String,
}

impl ServiceEvent {
    /// Create a new service event. `service_type` and `service_endpoint` are
    /// stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArguments`] if any argument is empty, then
    /// [`Error::InvalidId`] if `id` is not `{did}#service-{integer}`.
    pub fn new(
        id: impl Into<String>, service_type: impl Into<String>,
        service_endpoint: impl Into<String>,
    ) -> crate::Result<Self> {
        let id = id.into();
        let service_type = service_type.into();
        let service_endpoint = service_endpoint.into();
        require(ARGS, &[id.as_str(), service_type.as_str(), service_endpoint.as_str()])?;
        IdFormat::Service.validate(&id)?;

        Ok(Self {
            id,
            service_type,
            service_endpoint,
        })
    }

    /// Rebuild a service event from the object held under the `Service` key
    /// of an event tree.
    ///
    /// # Errors
    ///
    /// Fails as [`ServiceEvent::new`] does.
    pub fn from_json_tree(tree: &Value) -> crate::Result<Self> {
        let (Some(id), Some(service_type), Some(service_endpoint)) =
            (field(tree, "id"), field(tree, "type"), field(tree, "serviceEndpoint"))
        else {
            return Err(Error::MissingArguments(ARGS));
        };
        Self::new(id, service_type, service_endpoint)
    }

    /// The service endpoint URI.
    #[must_use]
    pub fn service_endpoint(&self) -> &str {
        &self.service_endpoint
    }
}

impl DidEvent for ServiceEvent {
    fn target(&self) -> EventTarget {
        EventTarget::Service
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn event_type(&self) -> &str {
        &self.service_type
    }

    fn json_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("id".into(), json!(self.id));
        body.insert("type".into(), json!(self.service_type));
        body.insert("serviceEndpoint".into(), json!(self.service_endpoint));
        body
    }
}
