//! JSON request bodies for the node's debug endpoints.
//!
//! Field names follow the node API (`snake_case`). Amounts are serialized as
//! JSON numbers; serde_json handles the full `u128` range. Salts exceed that
//! range and travel as `0x` hex.

use serde::{Deserialize, Serialize};

use crate::encoding::{self, Prefix};
use crate::error::TxError;
use crate::schema::TxKind;
use crate::tx::*;
use crate::types::{Pointer, Ttl};

/// Endpoint serving `kind`, relative to the authority's base url.
pub fn endpoint(kind: TxKind) -> &'static str {
    match kind {
        TxKind::Spend => "/debug/transactions/spend",
        TxKind::NamePreclaim => "/debug/names/preclaim",
        TxKind::NameClaim => "/debug/names/claim",
        TxKind::NameUpdate => "/debug/names/update",
        TxKind::NameRevoke => "/debug/names/revoke",
        TxKind::NameTransfer => "/debug/names/transfer",
        TxKind::ContractCreate => "/debug/contracts/create",
        TxKind::ContractCall => "/debug/contracts/call",
        TxKind::OracleRegister => "/debug/oracles/register",
        TxKind::OracleExtend => "/debug/oracles/extend",
        TxKind::OracleQuery => "/debug/oracles/query",
        TxKind::OracleResponse => "/debug/oracles/respond",
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TtlBody {
    #[serde(rename = "type")]
    kind: &'static str,
    value: u64,
}

impl From<Ttl> for TtlBody {
    fn from(ttl: Ttl) -> Self {
        Self {
            kind: ttl.type_name(),
            value: ttl.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PointerBody<'a> {
    key: &'a str,
    id: &'a str,
}

impl<'a> From<&'a Pointer> for PointerBody<'a> {
    fn from(p: &'a Pointer) -> Self {
        Self {
            key: &p.key,
            id: &p.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SpendBody<'a> {
    sender_id: &'a str,
    recipient_id: &'a str,
    amount: u128,
    fee: u128,
    ttl: u64,
    nonce: u64,
    payload: &'a str,
}

impl<'a> SpendBody<'a> {
    /// The endpoint takes the payload as a JSON string.
    pub(crate) fn new(p: &'a SpendTx) -> Result<Self, TxError> {
        let payload = std::str::from_utf8(&p.payload)
            .map_err(|e| TxError::validation("payload", format!("not UTF-8: {e}")))?;
        Ok(Self {
            sender_id: &p.sender_id,
            recipient_id: &p.recipient_id,
            amount: p.amount,
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
            payload,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PreclaimBody<'a> {
    account_id: &'a str,
    commitment_id: &'a str,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a NamePreclaimTx> for PreclaimBody<'a> {
    fn from(p: &'a NamePreclaimTx) -> Self {
        Self {
            account_id: &p.account_id,
            commitment_id: &p.commitment_id,
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClaimBody<'a> {
    account_id: &'a str,
    /// `nm_` encoding of the normalized name.
    name: String,
    name_salt: String,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> ClaimBody<'a> {
    pub(crate) fn new(p: &'a NameClaimTx, normalized_name: &str) -> Self {
        Self {
            account_id: &p.account_id,
            name: encoding::encode(Prefix::Name, normalized_name.as_bytes()),
            name_salt: p.name_salt.to_hex(),
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    account_id: &'a str,
    name_id: &'a str,
    name_ttl: u64,
    pointers: Vec<PointerBody<'a>>,
    client_ttl: u64,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a NameUpdateTx> for UpdateBody<'a> {
    fn from(p: &'a NameUpdateTx) -> Self {
        Self {
            account_id: &p.account_id,
            name_id: &p.name_id,
            name_ttl: p.name_ttl,
            pointers: p.pointers.iter().map(PointerBody::from).collect(),
            client_ttl: p.client_ttl,
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RevokeBody<'a> {
    account_id: &'a str,
    name_id: &'a str,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a NameRevokeTx> for RevokeBody<'a> {
    fn from(p: &'a NameRevokeTx) -> Self {
        Self {
            account_id: &p.account_id,
            name_id: &p.name_id,
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TransferBody<'a> {
    account_id: &'a str,
    name_id: &'a str,
    recipient_id: &'a str,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a NameTransferTx> for TransferBody<'a> {
    fn from(p: &'a NameTransferTx) -> Self {
        Self {
            account_id: &p.account_id,
            name_id: &p.name_id,
            recipient_id: &p.recipient_id,
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContractCreateBody<'a> {
    owner_id: &'a str,
    nonce: u64,
    /// `cb_` encoded.
    code: String,
    vm_version: u64,
    deposit: u128,
    amount: u128,
    gas: u64,
    gas_price: u128,
    fee: u128,
    ttl: u64,
    /// `cb_` encoded.
    call_data: String,
}

impl<'a> From<&'a ContractCreateTx> for ContractCreateBody<'a> {
    fn from(p: &'a ContractCreateTx) -> Self {
        Self {
            owner_id: &p.owner_id,
            nonce: p.nonce,
            code: encoding::encode(Prefix::ContractBytearray, &p.code),
            vm_version: p.vm_version,
            deposit: p.deposit,
            amount: p.amount,
            gas: p.gas,
            gas_price: p.gas_price,
            fee: p.fee,
            ttl: p.ttl,
            call_data: encoding::encode(Prefix::ContractBytearray, &p.call_data),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContractCallBody<'a> {
    caller_id: &'a str,
    nonce: u64,
    contract_id: &'a str,
    vm_version: u64,
    amount: u128,
    gas: u64,
    gas_price: u128,
    fee: u128,
    ttl: u64,
    call_data: String,
}

impl<'a> From<&'a ContractCallTx> for ContractCallBody<'a> {
    fn from(p: &'a ContractCallTx) -> Self {
        Self {
            caller_id: &p.caller_id,
            nonce: p.nonce,
            contract_id: &p.contract_id,
            vm_version: p.vm_version,
            amount: p.amount,
            gas: p.gas,
            gas_price: p.gas_price,
            fee: p.fee,
            ttl: p.ttl,
            call_data: encoding::encode(Prefix::ContractBytearray, &p.call_data),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OracleRegisterBody<'a> {
    account_id: &'a str,
    query_format: &'a str,
    response_format: &'a str,
    query_fee: u128,
    oracle_ttl: TtlBody,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a OracleRegisterTx> for OracleRegisterBody<'a> {
    fn from(p: &'a OracleRegisterTx) -> Self {
        Self {
            account_id: &p.account_id,
            query_format: &p.query_format,
            response_format: &p.response_format,
            query_fee: p.query_fee,
            oracle_ttl: p.oracle_ttl.into(),
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OracleExtendBody<'a> {
    oracle_id: &'a str,
    oracle_ttl: TtlBody,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a OracleExtendTx> for OracleExtendBody<'a> {
    fn from(p: &'a OracleExtendTx) -> Self {
        Self {
            oracle_id: &p.oracle_id,
            oracle_ttl: p.oracle_ttl.into(),
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OracleQueryBody<'a> {
    sender_id: &'a str,
    oracle_id: &'a str,
    query: &'a str,
    query_fee: u128,
    query_ttl: TtlBody,
    response_ttl: TtlBody,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a OraclePostQueryTx> for OracleQueryBody<'a> {
    fn from(p: &'a OraclePostQueryTx) -> Self {
        Self {
            sender_id: &p.sender_id,
            oracle_id: &p.oracle_id,
            query: &p.query,
            query_fee: p.query_fee,
            query_ttl: p.query_ttl.into(),
            response_ttl: p.response_ttl.into(),
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OracleRespondBody<'a> {
    oracle_id: &'a str,
    query_id: &'a str,
    response: &'a str,
    response_ttl: TtlBody,
    fee: u128,
    ttl: u64,
    nonce: u64,
}

impl<'a> From<&'a OracleRespondTx> for OracleRespondBody<'a> {
    fn from(p: &'a OracleRespondTx) -> Self {
        Self {
            oracle_id: &p.oracle_id,
            query_id: &p.query_id,
            response: &p.response,
            response_ttl: p.response_ttl.into(),
            fee: p.fee,
            ttl: p.ttl,
            nonce: p.nonce,
        }
    }
}

/// Reply of every endpoint. `contract_id` and `query_id` are only present
/// for contract create and oracle query.
#[derive(Debug, Deserialize)]
pub(crate) struct Reply {
    pub tx: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub query_id: Option<String>,
}
