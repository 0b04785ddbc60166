//! Blake2b-256 and the identifiers derived from it.
//!
//! All derivations are pure: anyone holding the inputs computes the same id
//! the chain will assign, without asking a node.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::encoding::Prefix;
use crate::error::DecodeError;
use crate::rlp;
use crate::types::{Id, Salt};

type Blake2b256 = Blake2b<U32>;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

fn blake2b_256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `cm_` commitment over an already normalized name.
///
/// Use [`NameRules::commitment_id`](crate::names::NameRules::commitment_id)
/// or [`commitment_id`](crate::names::commitment_id) to normalize first.
pub fn commitment_hash(normalized_name: &str, salt: &Salt) -> Id {
    let digest = blake2b_256_concat(&[normalized_name.as_bytes(), &salt.0]);
    Id::from_hash(Prefix::Commitment, digest)
}

/// The oracle registered by `account_id`: same key, `ok_` prefix.
pub fn oracle_id(account_id: &Id) -> Result<Id, DecodeError> {
    account_id.retag(Prefix::OraclePubkey)
}

/// Id of the query `sender_id` posts to `oracle_id` with `nonce`.
///
/// The nonce is hashed as a 32-byte big-endian word.
pub fn query_id(sender_id: &Id, nonce: u64, oracle_id: &Id) -> Id {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&nonce.to_be_bytes());
    let digest = blake2b_256_concat(&[sender_id.as_bytes(), &word, oracle_id.as_bytes()]);
    Id::from_hash(Prefix::OracleQueryId, digest)
}

/// Address of the contract `owner_id` creates with `nonce`.
///
/// The nonce is hashed in its minimal big-endian form.
pub fn contract_id(owner_id: &Id, nonce: u64) -> Id {
    let nonce = rlp::int_bytes(u128::from(nonce));
    let digest = blake2b_256_concat(&[owner_id.as_bytes(), &nonce]);
    Id::from_hash(Prefix::ContractPubkey, digest)
}

/// Namehash of an already normalized name: labels are folded right to left
/// into `node = H(node ‖ H(label))`, starting from 32 zero bytes.
pub fn name_hash(normalized_name: &str) -> [u8; 32] {
    normalized_name
        .rsplit('.')
        .fold([0u8; 32], |node, label| {
            blake2b_256_concat(&[&node, &blake2b_256(label.as_bytes())])
        })
}

/// `th_` hash of serialized transaction bytes.
pub fn tx_hash(tx: &[u8]) -> Id {
    Id::from_hash(Prefix::TxHash, blake2b_256(tx))
}
