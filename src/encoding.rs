//! Checksummed textual identifiers.
//!
//! Every identifier is `<prefix>_<base(payload ‖ checksum)>` where the
//! checksum is the first 4 bytes of `sha256(sha256(payload))`. The prefix
//! decides the base (58 or 64) and, for keys and hashes, the payload width.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

use crate::error::DecodeError;

const CHECKSUM_LEN: usize = 4;

/// Identifier type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    AccountPubkey,
    Name,
    Commitment,
    OraclePubkey,
    OracleQueryId,
    ContractPubkey,
    TxHash,
    ContractBytearray,
    OracleQuery,
    OracleResponse,
    Transaction,
}

/// Text alphabet an identifier's payload is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Base58,
    Base64,
}

impl Prefix {
    /// Every known prefix.
    pub const ALL: [Prefix; 11] = [
        Prefix::AccountPubkey,
        Prefix::Name,
        Prefix::Commitment,
        Prefix::OraclePubkey,
        Prefix::OracleQueryId,
        Prefix::ContractPubkey,
        Prefix::TxHash,
        Prefix::ContractBytearray,
        Prefix::OracleQuery,
        Prefix::OracleResponse,
        Prefix::Transaction,
    ];

    /// The two-letter code written before the `_`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountPubkey => "ak",
            Self::Name => "nm",
            Self::Commitment => "cm",
            Self::OraclePubkey => "ok",
            Self::OracleQueryId => "oq",
            Self::ContractPubkey => "ct",
            Self::TxHash => "th",
            Self::ContractBytearray => "cb",
            Self::OracleQuery => "ov",
            Self::OracleResponse => "or",
            Self::Transaction => "tx",
        }
    }

    /// Look up a prefix by its two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == code)
    }

    /// Base58 for keys and hashes, base64 for byte arrays and transactions.
    pub fn base(self) -> Base {
        match self {
            Self::ContractBytearray
            | Self::OracleQuery
            | Self::OracleResponse
            | Self::Transaction => Base::Base64,
            _ => Base::Base58,
        }
    }

    /// Fixed payload width, `None` for variable-length payloads.
    pub fn payload_len(self) -> Option<usize> {
        match self {
            Self::AccountPubkey
            | Self::Commitment
            | Self::OraclePubkey
            | Self::OracleQueryId
            | Self::ContractPubkey
            | Self::TxHash => Some(32),
            _ => None,
        }
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First 4 bytes of `sha256(sha256(payload))`.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let once = Sha256::digest(payload);
    let twice = Sha256::digest(once);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&twice[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` under `prefix`. Does not check fixed widths; callers
/// producing keys and hashes always hand in 32 bytes.
pub fn encode(prefix: Prefix, payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum(payload));

    let body = match prefix.base() {
        Base::Base58 => bs58::encode(buf).into_string(),
        Base::Base64 => STANDARD.encode(buf),
    };
    format!("{prefix}_{body}")
}

/// Split, base-decode and checksum-verify a textual identifier.
pub fn decode(text: &str) -> Result<(Prefix, Vec<u8>), DecodeError> {
    let (code, body) = text.split_once('_').ok_or(DecodeError::MissingSeparator)?;
    let prefix =
        Prefix::from_code(code).ok_or_else(|| DecodeError::UnknownPrefix(code.to_string()))?;

    let raw = match prefix.base() {
        Base::Base58 => bs58::decode(body)
            .into_vec()
            .map_err(|e| DecodeError::Base58(e.to_string()))?,
        Base::Base64 => STANDARD
            .decode(body)
            .map_err(|e| DecodeError::Base64(e.to_string()))?,
    };

    if raw.len() < CHECKSUM_LEN {
        return Err(DecodeError::TooShort(raw.len()));
    }
    let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload) != check {
        return Err(DecodeError::Checksum);
    }

    if let Some(expected) = prefix.payload_len() {
        if payload.len() != expected {
            return Err(DecodeError::Length {
                prefix,
                expected,
                actual: payload.len(),
            });
        }
    }

    Ok((prefix, payload.to_vec()))
}

/// [`decode`] and require one of `allowed` prefixes.
pub fn decode_as(text: &str, allowed: &[Prefix]) -> Result<(Prefix, Vec<u8>), DecodeError> {
    let (prefix, payload) = decode(text)?;
    if !allowed.contains(&prefix) {
        let expected = allowed
            .iter()
            .map(|p| format!("`{p}`"))
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(DecodeError::UnexpectedPrefix {
            expected,
            found: prefix,
        });
    }
    Ok((prefix, payload))
}
