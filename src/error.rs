//! # Errors
//!
//! A single error type covers every way an event can fail to come into
//! existence. Validation errors carry a human-readable message; the
//! `Display` output of the two validation variants is part of the public
//! contract and must not change.

use thiserror::Error;

/// Errors returned when constructing, reconstructing or decoding DID events.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required event arguments were absent or empty. Holds the
    /// name of the variant's field group, e.g. "DID Owner".
    #[error("Validation failed. {0} args are missing")]
    MissingArguments(&'static str),

    /// All arguments were present but the event id did not have the required
    /// shape. Holds the expected format, e.g. `{did}#did-root-key`.
    #[error("Event ID is invalid. Expected format: {0}")]
    InvalidId(&'static str),

    /// The top-level key of an event tree is not a known event target.
    #[error("unknown event target: {0}")]
    UnknownTarget(String),

    /// The event tree or payload does not have the expected structure.
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// A DID identifier could not be parsed.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// Public key material is not valid for its algorithm.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// An event argument holds a value outside its allowed set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Returns the error message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingArguments(_) | Self::InvalidId(_) | Self::Other(_) => self.to_string(),
            Self::UnknownTarget(msg)
            | Self::MalformedEvent(msg)
            | Self::InvalidDid(msg)
            | Self::InvalidPublicKey(msg)
            | Self::InvalidArgument(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn validation_messages() {
        let err = Error::MissingArguments("DID Owner");
        assert_eq!(err.to_string(), "Validation failed. DID Owner args are missing");

        let err = Error::InvalidId("{did}#service-{integer}");
        assert_eq!(err.to_string(), "Event ID is invalid. Expected format: {did}#service-{integer}");
    }

    #[test]
    fn error_message() {
        let err = Error::UnknownTarget("Document".into());
        assert_eq!(err.message(), "Document");
        assert_eq!(err.to_string(), "unknown event target: Document");

        let err: Error = anyhow!("issue decoding payload").into();
        assert_eq!(err.message(), "issue decoding payload");
    }
}
