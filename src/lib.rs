//! # Hedera DID Events
//!
//! Typed, self-validating events describing mutations to a `did:hedera`
//! document. Events are published to the DID's consensus topic and replayed
//! by resolvers to rebuild the document.
//!
//! Every event validates on construction, projects to a canonical JSON tree,
//! serializes to compact JSON with a fixed key order, and encodes to the
//! base64 payload placed on the ledger. Reading a payload back with
//! [`Event::from_base64`] yields an event that re-serializes byte for byte.
//!
//! # Example
//!
//! ```
//! use hedera_did_event::{DidEvent, Event, Operation, ServiceEvent};
//!
//! let did = "did:hedera:testnet:zAEExD23v9wrEUVHKvb7tiJmAMGCqHoxW8yqWNyFw3SXC_0.0.29613327";
//! let event = ServiceEvent::new(
//!     format!("{did}#service-1"),
//!     "DIDCommMessaging",
//!     "https://vc.test.service.com",
//! )?;
//!
//! let payload = event.base64();
//! let replayed = Event::from_base64(Operation::Create, &payload)?;
//! assert_eq!(replayed.to_json(), event.to_json());
//! # Ok::<(), hedera_did_event::Error>(())
//! ```

pub mod did;
mod error;
pub mod event;
pub mod hashing;
mod key;

pub use self::did::{HederaDid, Network, TopicId};
pub use self::error::Error;
pub use self::event::{
    DidEvent, DidOwnerEvent, Event, EventTarget, Operation, RelationshipType, ServiceEvent,
    VerificationMethodEvent, VerificationRelationshipEvent,
};
pub use self::key::*;

/// Result type for DID event operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
