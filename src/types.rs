//! Core value types: identifiers, ttls, name salts, pointers and the
//! unsigned transaction envelope.

use std::str::FromStr;

use crate::encoding::{self, Prefix};
use crate::error::DecodeError;
use crate::hash;

/// A decoded, checksum-verified identifier: a prefix plus its raw payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id {
    prefix: Prefix,
    payload: Vec<u8>,
}

impl Id {
    /// Fails if `prefix` has a fixed width and `payload` does not match it.
    pub fn new(prefix: Prefix, payload: Vec<u8>) -> Result<Self, DecodeError> {
        if let Some(expected) = prefix.payload_len() {
            if payload.len() != expected {
                return Err(DecodeError::Length {
                    prefix,
                    expected,
                    actual: payload.len(),
                });
            }
        }
        Ok(Self { prefix, payload })
    }

    pub(crate) fn from_hash(prefix: Prefix, hash: [u8; 32]) -> Self {
        Self {
            prefix,
            payload: hash.to_vec(),
        }
    }

    /// The identifier's type tag.
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Same payload under another prefix, e.g. an account key as an oracle.
    pub fn retag(&self, prefix: Prefix) -> Result<Self, DecodeError> {
        Self::new(prefix, self.payload.clone())
    }
}

impl FromStr for Id {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, payload) = encoding::decode(s)?;
        Ok(Self { prefix, payload })
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encoding::encode(self.prefix, &self.payload))
    }
}

impl std::fmt::Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({self})")
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}

/// Relative or absolute time-to-live of an oracle, query or response.
///
/// A delta is only ever carried as data; resolving it against the current
/// height happens on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    Delta(u64),
    Block(u64),
}

impl Ttl {
    /// Wire discriminator: `0` for delta, `1` for block.
    pub fn type_code(&self) -> u64 {
        match self {
            Self::Delta(_) => 0,
            Self::Block(_) => 1,
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            Self::Delta(v) | Self::Block(v) => *v,
        }
    }

    /// `delta` or `block`, as used in JSON request bodies.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Delta(_) => "delta",
            Self::Block(_) => "block",
        }
    }

    pub fn is_delta(&self) -> bool {
        matches!(self, Self::Delta(_))
    }
}

/// 256-bit name salt, big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Salt(pub [u8; 32]);

impl Salt {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// `0x`-prefixed, zero-padded hex.
    pub fn to_hex(self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Accepts 1 to 64 hex digits, with or without `0x`.
    pub fn from_hex(text: &str) -> Result<Self, DecodeError> {
        let digits = text.strip_prefix("0x").unwrap_or(text);
        if digits.is_empty() || digits.len() > 64 {
            return Err(DecodeError::Hex(format!(
                "expected 1 to 64 hex digits, got {}",
                digits.len()
            )));
        }
        let padded = format!("{digits:0>64}");
        let bytes = hex::decode(padded).map_err(|e| DecodeError::Hex(e.to_string()))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl From<u128> for Salt {
    fn from(v: u128) -> Self {
        let mut out = [0u8; 32];
        out[16..].copy_from_slice(&v.to_be_bytes());
        Self(out)
    }
}

impl From<u64> for Salt {
    fn from(v: u64) -> Self {
        Self::from(u128::from(v))
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

/// A name pointer: `key` (e.g. `account_pubkey`) to a target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    pub key: String,
    pub id: String,
}

impl Pointer {
    pub fn new(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
        }
    }
}

/// Canonical bytes of an unsigned transaction.
///
/// Displays as the `tx_` base64check envelope.
#[derive(Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    bytes: Vec<u8>,
}

impl UnsignedTx {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `th_` hash of the transaction bytes.
    pub fn hash(&self) -> Id {
        hash::tx_hash(&self.bytes)
    }
}

impl FromStr for UnsignedTx {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, bytes) = encoding::decode_as(s, &[Prefix::Transaction])?;
        Ok(Self { bytes })
    }
}

impl std::fmt::Display for UnsignedTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encoding::encode(Prefix::Transaction, &self.bytes))
    }
}

impl std::fmt::Debug for UnsignedTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnsignedTx({})", hex::encode(&self.bytes))
    }
}

/// Result of a contract-create build: the transaction and the address the
/// contract will live at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreated {
    pub tx: UnsignedTx,
    pub contract_id: Id,
}

/// Result of an oracle post-query build: the transaction and the id the
/// query will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPosted {
    pub tx: UnsignedTx,
    pub query_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

    #[test]
    fn id_parses_and_displays() {
        let id: Id = SENDER.parse().unwrap();
        assert_eq!(id.prefix(), Prefix::AccountPubkey);
        assert_eq!(id.as_bytes().len(), 32);
        assert_eq!(id.to_string(), SENDER);
    }

    #[test]
    fn retag_keeps_payload() {
        let id: Id = SENDER.parse().unwrap();
        let oracle = id.retag(Prefix::OraclePubkey).unwrap();
        assert_eq!(
            oracle.to_string(),
            "ok_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688"
        );
        assert_eq!(oracle.as_bytes(), id.as_bytes());
    }

    #[test]
    fn retag_checks_width() {
        let name = Id::new(Prefix::Name, b"short".to_vec()).unwrap();
        assert!(name.retag(Prefix::AccountPubkey).is_err());
    }

    #[test]
    fn id_new_rejects_wrong_width() {
        assert!(Id::new(Prefix::ContractPubkey, vec![0; 33]).is_err());
        assert!(Id::new(Prefix::Name, vec![0; 33]).is_ok());
    }

    #[test]
    fn ttl_discriminators() {
        assert_eq!(Ttl::Delta(500).type_code(), 0);
        assert_eq!(Ttl::Block(500).type_code(), 1);
        assert_eq!(Ttl::Delta(500).value(), 500);
        assert!(Ttl::Delta(1).is_delta());
        assert!(!Ttl::Block(1).is_delta());
    }

    #[test]
    fn salt_from_int_is_right_aligned() {
        let salt = Salt::from(0x1234u64);
        assert_eq!(salt.0[30..], [0x12, 0x34]);
        assert!(salt.0[..30].iter().all(|&b| b == 0));
    }

    #[test]
    fn salt_hex() {
        let salt = Salt::from(0xABCDu64);
        let text = salt.to_hex();
        assert_eq!(text.len(), 66);
        assert_eq!(Salt::from_hex(&text).unwrap(), salt);
        assert_eq!(Salt::from_hex("abcd").unwrap(), salt);
        assert!(Salt::from_hex("").is_err());
        assert!(matches!(Salt::from_hex("0xzz"), Err(DecodeError::Hex(_))));
        assert!(Salt::from_hex(&"1".repeat(65)).is_err());
    }

    #[test]
    fn unsigned_tx_envelope() {
        let tx = UnsignedTx::from_bytes(vec![0xC0]);
        let text = tx.to_string();
        assert!(text.starts_with("tx_"));
        assert_eq!(text.parse::<UnsignedTx>().unwrap(), tx);
        assert!(SENDER.parse::<UnsignedTx>().is_err());
    }
}
