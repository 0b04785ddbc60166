//! Naming system transactions: preclaim, claim, update, revoke, transfer.
//!
//! A name is registered in two steps. The preclaim publishes only a
//! commitment `H(name ‖ salt)`; the claim later reveals name and salt, and
//! the chain re-derives the commitment to check ownership.

use std::collections::HashSet;

use crate::encoding::Prefix;
use crate::error::TxError;
use crate::names::NameRules;
use crate::rlp::Field;
use crate::schema::{TxKind, MAX_POINTERS, POINTER_TARGETS};
use crate::types::{Id, Pointer, Salt, UnsignedTx};

use super::{check_nonce, finish, parse_id, parse_name_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePreclaimTx {
    pub account_id: String,
    pub commitment_id: String,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

/// `name` may be plain text or the `nm_` encoding of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClaimTx {
    pub account_id: String,
    pub name: String,
    pub name_salt: Salt,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

impl NameClaimTx {
    /// The commitment this claim reveals, for checking against the preclaim.
    pub fn commitment_id(&self, rules: &NameRules) -> Result<Id, TxError> {
        rules.commitment_id(&self.name, &self.name_salt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameUpdateTx {
    pub account_id: String,
    pub name_id: String,
    pub name_ttl: u64,
    pub pointers: Vec<Pointer>,
    pub client_ttl: u64,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRevokeTx {
    pub account_id: String,
    pub name_id: String,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTransferTx {
    pub account_id: String,
    pub name_id: String,
    pub recipient_id: String,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

fn account(text: &str) -> Result<Id, TxError> {
    parse_id("account_id", text, &[Prefix::AccountPubkey])
}

/// Layout: `[33, 1, account_id, nonce, commitment_id, fee, ttl]`
pub fn build_name_preclaim_tx(params: &NamePreclaimTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let account = account(&params.account_id)?;
    let commitment = parse_id("commitment_id", &params.commitment_id, &[Prefix::Commitment])?;

    finish(
        TxKind::NamePreclaim,
        vec![
            account.into(),
            params.nonce.into(),
            commitment.into(),
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

/// Claim under the default [`NameRules`].
pub fn build_name_claim_tx(params: &NameClaimTx) -> Result<UnsignedTx, TxError> {
    build_name_claim_tx_with(params, &NameRules::default())
}

/// Layout: `[32, 1, account_id, nonce, name, name_salt, fee, ttl]`
pub fn build_name_claim_tx_with(
    params: &NameClaimTx,
    rules: &NameRules,
) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let name = rules.parse_name(&params.name)?;
    let account = account(&params.account_id)?;

    finish(
        TxKind::NameClaim,
        vec![
            account.into(),
            params.nonce.into(),
            Field::Bytes(name.into_bytes()),
            Field::Word(params.name_salt.to_bytes()),
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

/// Layout: `[34, 1, account_id, nonce, name_id, name_ttl, pointers,
/// client_ttl, fee, ttl]`, each pointer `[key, id]`.
pub fn build_name_update_tx(params: &NameUpdateTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    check_pointers(&params.pointers)?;

    let account = account(&params.account_id)?;
    let name = parse_name_id("name_id", &params.name_id)?;

    let mut pointers = Vec::with_capacity(params.pointers.len());
    for pointer in &params.pointers {
        let target = parse_id("pointers", &pointer.id, POINTER_TARGETS)?;
        pointers.push(Field::List(vec![
            Field::Bytes(pointer.key.as_bytes().to_vec()),
            target.into(),
        ]));
    }

    finish(
        TxKind::NameUpdate,
        vec![
            account.into(),
            params.nonce.into(),
            name.into(),
            params.name_ttl.into(),
            Field::List(pointers),
            params.client_ttl.into(),
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

fn check_pointers(pointers: &[Pointer]) -> Result<(), TxError> {
    if pointers.len() > MAX_POINTERS {
        return Err(TxError::validation(
            "pointers",
            format!("at most {MAX_POINTERS} pointers, got {}", pointers.len()),
        ));
    }
    let mut seen = HashSet::new();
    for pointer in pointers {
        if pointer.key.is_empty() {
            return Err(TxError::validation("pointers", "pointer key is empty"));
        }
        if !seen.insert(pointer.key.as_str()) {
            return Err(TxError::validation(
                "pointers",
                format!("duplicate pointer key {:?}", pointer.key),
            ));
        }
    }
    Ok(())
}

/// Layout: `[35, 1, account_id, nonce, name_id, fee, ttl]`
pub fn build_name_revoke_tx(params: &NameRevokeTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let account = account(&params.account_id)?;
    let name = parse_name_id("name_id", &params.name_id)?;

    finish(
        TxKind::NameRevoke,
        vec![
            account.into(),
            params.nonce.into(),
            name.into(),
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

/// Layout: `[36, 1, account_id, nonce, name_id, recipient_id, fee, ttl]`
pub fn build_name_transfer_tx(params: &NameTransferTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let account = account(&params.account_id)?;
    let name = parse_name_id("name_id", &params.name_id)?;
    let recipient = parse_id("recipient_id", &params.recipient_id, &[Prefix::AccountPubkey])?;

    finish(
        TxKind::NameTransfer,
        vec![
            account.into(),
            params.nonce.into(),
            name.into(),
            recipient.into(),
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}
