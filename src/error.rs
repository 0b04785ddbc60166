//! Error types for identifier decoding, transaction building and the remote
//! authority.

use thiserror::Error;

use crate::encoding::Prefix;

/// Errors returned by the transaction builders.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("invalid `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("cannot decode `{field}`: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The encoder was handed a field list that does not match the schema
    /// of its `(tag, version)`. Always a bug in this crate.
    #[error("encoding invariant violated: {0}")]
    EncodingInvariant(String),

    #[error("remote authority error: {0}")]
    Remote(#[from] RemoteError),
}

impl TxError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(field: &'static str) -> impl FnOnce(DecodeError) -> Self {
        move |source| Self::Decode { field, source }
    }

    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the parameter that caused the error, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } | Self::Decode { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Failures of the checksummed identifier codec and the RLP decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing `_` separator after the prefix")]
    MissingSeparator,

    #[error("unknown prefix `{0}`")]
    UnknownPrefix(String),

    #[error("expected prefix {expected}, found `{found}`")]
    UnexpectedPrefix { expected: String, found: Prefix },

    #[error("invalid base58: {0}")]
    Base58(String),

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("input too short to carry a checksum ({0} bytes)")]
    TooShort(usize),

    #[error("checksum mismatch")]
    Checksum,

    #[error("`{prefix}` payload must be {expected} bytes, got {actual}")]
    Length {
        prefix: Prefix,
        expected: usize,
        actual: usize,
    },

    #[error("invalid hex: {0}")]
    Hex(String),

    #[error("malformed RLP: {0}")]
    Rlp(String),
}

/// Remote authority errors (transport and reply parsing).
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("authority returned status {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed reply from {endpoint}: {reason}")]
    Reply { endpoint: String, reason: String },

    #[cfg(feature = "remote")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
