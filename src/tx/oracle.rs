//! Oracle transactions: register, extend, post query, respond.
//!
//! An oracle lives at its owner's key under the `ok_` prefix, so extend and
//! respond are signed by the account whose key equals the oracle's.

use crate::encoding::Prefix;
use crate::error::TxError;
use crate::hash;
use crate::rlp::Field;
use crate::schema::TxKind;
use crate::types::{Id, QueryPosted, Ttl, UnsignedTx};

use super::{check_nonce, finish, parse_id, response_ttl_fields, ttl_fields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRegisterTx {
    pub account_id: String,
    pub query_format: String,
    pub response_format: String,
    pub query_fee: u128,
    pub oracle_ttl: Ttl,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

impl OracleRegisterTx {
    /// The oracle id this registration creates.
    pub fn oracle_id(&self) -> Result<Id, TxError> {
        let account = parse_id("account_id", &self.account_id, &[Prefix::AccountPubkey])?;
        hash::oracle_id(&account).map_err(TxError::decode("account_id"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleExtendTx {
    pub oracle_id: String,
    /// Signing account; must own `oracle_id`.
    pub caller_id: String,
    pub oracle_ttl: Ttl,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePostQueryTx {
    pub sender_id: String,
    pub oracle_id: String,
    pub query: String,
    pub query_fee: u128,
    pub query_ttl: Ttl,
    /// Must be [`Ttl::Delta`].
    pub response_ttl: Ttl,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRespondTx {
    pub oracle_id: String,
    /// Signing account; must own `oracle_id`.
    pub caller_id: String,
    pub query_id: String,
    pub response: String,
    /// Must be [`Ttl::Delta`].
    pub response_ttl: Ttl,
    pub nonce: u64,
    pub fee: u128,
    pub ttl: u64,
}

pub(crate) fn parse_oracle(text: &str) -> Result<Id, TxError> {
    parse_id("oracle_id", text, &[Prefix::OraclePubkey])
}

/// The caller signs for the oracle, so both must carry the same key.
pub(crate) fn check_owner(caller_text: &str, oracle: &Id) -> Result<(), TxError> {
    let caller = parse_id("caller_id", caller_text, &[Prefix::AccountPubkey])?;
    if caller.as_bytes() != oracle.as_bytes() {
        return Err(TxError::validation(
            "caller_id",
            format!("{caller} does not own {oracle}"),
        ));
    }
    Ok(())
}

/// Layout: `[22, 1, account_id, nonce, query_format, response_format,
/// query_fee, ttl_type, ttl_value, fee, ttl]`
pub fn build_oracle_register_tx(params: &OracleRegisterTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let [ttl_type, ttl_value] = ttl_fields("oracle_ttl", params.oracle_ttl)?;
    let account = parse_id("account_id", &params.account_id, &[Prefix::AccountPubkey])?;

    finish(
        TxKind::OracleRegister,
        vec![
            account.into(),
            params.nonce.into(),
            Field::Bytes(params.query_format.as_bytes().to_vec()),
            Field::Bytes(params.response_format.as_bytes().to_vec()),
            params.query_fee.into(),
            ttl_type,
            ttl_value,
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

/// Layout: `[25, 1, oracle_id, nonce, ttl_type, ttl_value, fee, ttl]`
pub fn build_oracle_extend_tx(params: &OracleExtendTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let [ttl_type, ttl_value] = ttl_fields("oracle_ttl", params.oracle_ttl)?;
    let oracle = parse_oracle(&params.oracle_id)?;
    check_owner(&params.caller_id, &oracle)?;

    finish(
        TxKind::OracleExtend,
        vec![
            oracle.into(),
            params.nonce.into(),
            ttl_type,
            ttl_value,
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

/// Layout: `[23, 1, sender_id, nonce, oracle_id, query, query_fee,
/// query_ttl_type, query_ttl_value, response_ttl_type, response_ttl_value,
/// fee, ttl]`
///
/// Also returns the query id, derived from sender, nonce and oracle.
pub fn build_oracle_post_query_tx(params: &OraclePostQueryTx) -> Result<QueryPosted, TxError> {
    check_nonce(params.nonce)?;
    let [query_ttl_type, query_ttl_value] = ttl_fields("query_ttl", params.query_ttl)?;
    let [response_ttl_type, response_ttl_value] =
        response_ttl_fields("response_ttl", params.response_ttl)?;

    let sender = parse_id("sender_id", &params.sender_id, &[Prefix::AccountPubkey])?;
    let oracle = parse_oracle(&params.oracle_id)?;
    let query_id = hash::query_id(&sender, params.nonce, &oracle);

    let tx = finish(
        TxKind::OracleQuery,
        vec![
            sender.into(),
            params.nonce.into(),
            oracle.into(),
            Field::Bytes(params.query.as_bytes().to_vec()),
            params.query_fee.into(),
            query_ttl_type,
            query_ttl_value,
            response_ttl_type,
            response_ttl_value,
            params.fee.into(),
            params.ttl.into(),
        ],
    )?;

    Ok(QueryPosted { tx, query_id })
}

/// Layout: `[24, 1, oracle_id, nonce, query_id, response, ttl_type,
/// ttl_value, fee, ttl]`
pub fn build_oracle_respond_tx(params: &OracleRespondTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    let [ttl_type, ttl_value] = response_ttl_fields("response_ttl", params.response_ttl)?;
    let oracle = parse_oracle(&params.oracle_id)?;
    check_owner(&params.caller_id, &oracle)?;
    let query = parse_id("query_id", &params.query_id, &[Prefix::OracleQueryId])?;

    finish(
        TxKind::OracleResponse,
        vec![
            oracle.into(),
            params.nonce.into(),
            query.into(),
            Field::Bytes(params.response.as_bytes().to_vec()),
            ttl_type,
            ttl_value,
            params.fee.into(),
            params.ttl.into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::unpack_tx;

    const ACCOUNT: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";
    const ORACLE: &str = "ok_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

    fn register() -> OracleRegisterTx {
        OracleRegisterTx {
            account_id: ACCOUNT.into(),
            query_format: "{'city': str}".into(),
            response_format: "{'tmp': num}".into(),
            query_fee: 30_000,
            oracle_ttl: Ttl::Delta(500),
            nonce: 1,
            fee: 20_000,
            ttl: 500,
        }
    }

    fn post_query() -> OraclePostQueryTx {
        OraclePostQueryTx {
            sender_id: ACCOUNT.into(),
            oracle_id: ORACLE.into(),
            query: "{'city': 'Berlin'}".into(),
            query_fee: 30_000,
            query_ttl: Ttl::Delta(10),
            response_ttl: Ttl::Delta(10),
            nonce: 1,
            fee: 20_000,
            ttl: 500,
        }
    }

    fn respond(query_id: &Id) -> OracleRespondTx {
        OracleRespondTx {
            oracle_id: ORACLE.into(),
            caller_id: ACCOUNT.into(),
            query_id: query_id.to_string(),
            response: "{'tmp': 101}".into(),
            response_ttl: Ttl::Delta(10),
            nonce: 3,
            fee: 20_000,
            ttl: 500,
        }
    }

    #[test]
    fn register_vector() {
        let tx = build_oracle_register_tx(&register()).unwrap();
        assert_eq!(
            tx.to_string(),
            "tx_+EwWAaDhMrjx3begTmO3+pZHmlS7xSWlMafxvAzkkhIZAwZ/sAGNeydjaXR5Jzogc3RyfYx7J3RtcCc6IG51bX2CdTCAggH0gk4gggH0W+ZCfw=="
        );
    }

    #[test]
    fn register_derives_oracle_id() {
        assert_eq!(register().oracle_id().unwrap().to_string(), ORACLE);
    }

    #[test]
    fn register_rejects_zero_delta() {
        let mut p = register();
        p.oracle_ttl = Ttl::Delta(0);
        assert_eq!(build_oracle_register_tx(&p).unwrap_err().field(), Some("oracle_ttl"));
    }

    #[test]
    fn absolute_oracle_ttl() {
        let mut p = register();
        p.oracle_ttl = Ttl::Block(90_000);
        let tx = build_oracle_register_tx(&p).unwrap();
        let unpacked = unpack_tx(tx.as_bytes()).unwrap();
        assert_eq!(unpacked.get("oracle_ttl_type").unwrap().to_u64().unwrap(), 1);
        assert_eq!(unpacked.get("oracle_ttl_value").unwrap().to_u64().unwrap(), 90_000);
    }

    #[test]
    fn extend_checks_owner() {
        let mut p = OracleExtendTx {
            oracle_id: ORACLE.into(),
            caller_id: ACCOUNT.into(),
            oracle_ttl: Ttl::Delta(500),
            nonce: 2,
            fee: 20_000,
            ttl: 500,
        };
        let tx = build_oracle_extend_tx(&p).unwrap();
        assert_eq!(unpack_tx(tx.as_bytes()).unwrap().fields.len(), 6);

        p.caller_id = crate::encoding::encode(Prefix::AccountPubkey, &[1; 32]);
        assert_eq!(build_oracle_extend_tx(&p).unwrap_err().field(), Some("caller_id"));
    }

    #[test]
    fn post_query_returns_query_id() {
        let posted = build_oracle_post_query_tx(&post_query()).unwrap();
        assert_eq!(
            posted.query_id.to_string(),
            "oq_2ekVJopozKUFskt8x4Fvkg8YrCxk4GhHaDC6e7gGJATMjmxXeU"
        );
        let unpacked = unpack_tx(posted.tx.as_bytes()).unwrap();
        assert_eq!(unpacked.kind, TxKind::OracleQuery);
        assert_eq!(unpacked.get("query").unwrap().as_bytes().unwrap(), b"{'city': 'Berlin'}");
    }

    #[test]
    fn post_query_requires_relative_response_ttl() {
        let mut p = post_query();
        p.response_ttl = Ttl::Block(100);
        assert_eq!(
            build_oracle_post_query_tx(&p).unwrap_err().field(),
            Some("response_ttl")
        );
    }

    #[test]
    fn respond_to_posted_query() {
        let posted = build_oracle_post_query_tx(&post_query()).unwrap();
        let tx = build_oracle_respond_tx(&respond(&posted.query_id)).unwrap();
        let unpacked = unpack_tx(tx.as_bytes()).unwrap();
        assert_eq!(unpacked.kind, TxKind::OracleResponse);
        assert_eq!(
            unpacked.get("query_id").unwrap().as_bytes().unwrap(),
            posted.query_id.as_bytes()
        );
    }

    #[test]
    fn respond_rejects_foreign_caller() {
        let posted = build_oracle_post_query_tx(&post_query()).unwrap();
        let mut p = respond(&posted.query_id);
        p.caller_id = crate::encoding::encode(Prefix::AccountPubkey, &[2; 32]);
        assert_eq!(build_oracle_respond_tx(&p).unwrap_err().field(), Some("caller_id"));
    }
}
