use crate::encoding::Prefix;
use crate::error::TxError;
use crate::rlp::Field;
use crate::schema::TxKind;
use crate::types::UnsignedTx;

use super::{check_name_hash, check_nonce, finish, parse_id};

/// Token transfer. The recipient is an account or a name hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendTx {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: u128,
    pub fee: u128,
    pub ttl: u64,
    pub nonce: u64,
    pub payload: Vec<u8>,
}

/// Layout: `[12, 1, sender_id, recipient_id, amount, fee, ttl, nonce, payload]`
pub fn build_spend_tx(params: &SpendTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;

    let sender = parse_id("sender_id", &params.sender_id, &[Prefix::AccountPubkey])?;
    let recipient = parse_id(
        "recipient_id",
        &params.recipient_id,
        &[Prefix::AccountPubkey, Prefix::Name],
    )?;
    check_name_hash("recipient_id", &recipient)?;

    finish(
        TxKind::Spend,
        vec![
            sender.into(),
            recipient.into(),
            params.amount.into(),
            params.fee.into(),
            params.ttl.into(),
            params.nonce.into(),
            Field::Bytes(params.payload.clone()),
        ],
    )
}
