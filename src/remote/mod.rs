//! Remote transaction building.
//!
//! [`RemoteBuilder`] posts the parameters to a node's debug endpoints and
//! returns the node's encoding. The node is reached through an
//! [`Authority`]:
//!
//! - [`http::HttpAuthority`] -- JSON over HTTP with `reqwest`
//! - any other implementation, e.g. an in-process reference for tests

pub mod http;
pub mod request;

use std::str::FromStr;

use serde::Serialize;

use crate::api::TransactionBuilder;
use crate::error::{RemoteError, TxError};
use crate::names::NameRules;
use crate::schema::{unpack_tx, TxKind};
use crate::tx::oracle::{check_owner, parse_oracle};
use crate::tx::*;
use crate::types::{ContractCreated, Id, QueryPosted, UnsignedTx};

use request::*;

/// Something that answers JSON requests for a debug endpoint.
pub trait Authority: Send + Sync {
    /// POST `body` to `endpoint` and return the reply body.
    fn post(&self, endpoint: &str, body: &str) -> Result<String, RemoteError>;
}

impl<A: Authority + ?Sized> Authority for Box<A> {
    fn post(&self, endpoint: &str, body: &str) -> Result<String, RemoteError> {
        (**self).post(endpoint, body)
    }
}

/// Builder that delegates encoding to a node.
///
/// Names are normalized locally before being sent, and oracle ownership is
/// checked locally because the endpoints never see `caller_id`.
pub struct RemoteBuilder {
    authority: Box<dyn Authority>,
    rules: NameRules,
}

impl RemoteBuilder {
    pub fn new(authority: impl Authority + 'static) -> Self {
        Self {
            authority: Box::new(authority),
            rules: NameRules::default(),
        }
    }

    pub fn with_name_rules(mut self, rules: NameRules) -> Self {
        self.rules = rules;
        self
    }

    fn call<B: Serialize>(&self, kind: TxKind, body: &B) -> Result<Reply, TxError> {
        let endpoint = endpoint(kind);
        let json = serde_json::to_string(body).map_err(RemoteError::from)?;
        log::debug!("POST {endpoint} ({} bytes)", json.len());

        let raw = self.authority.post(endpoint, &json)?;
        let reply: Reply = serde_json::from_str(&raw).map_err(|e| RemoteError::Reply {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(reply)
    }

    fn tx<B: Serialize>(&self, kind: TxKind, body: &B) -> Result<UnsignedTx, TxError> {
        let reply = self.call(kind, body)?;
        parse_tx(kind, &reply.tx)
    }
}

/// Decode the reply's transaction and check it is of the requested kind.
fn parse_tx(kind: TxKind, text: &str) -> Result<UnsignedTx, TxError> {
    let tx = UnsignedTx::from_str(text).map_err(TxError::decode("tx"))?;
    let unpacked = unpack_tx(tx.as_bytes()).map_err(|e| {
        log::warn!("{} replied with an undecodable transaction: {e}", endpoint(kind));
        TxError::decode("tx")(e)
    })?;
    if unpacked.kind != kind {
        log::warn!(
            "{} replied with a {} transaction",
            endpoint(kind),
            unpacked.kind
        );
        return Err(RemoteError::Reply {
            endpoint: endpoint(kind).to_string(),
            reason: format!("expected a {kind} transaction, got {}", unpacked.kind),
        }
        .into());
    }
    Ok(tx)
}

/// Parse a derived id the reply must carry.
fn required_id(
    kind: TxKind,
    field: &'static str,
    value: Option<String>,
) -> Result<Id, TxError> {
    let text = value.ok_or_else(|| RemoteError::Reply {
        endpoint: endpoint(kind).to_string(),
        reason: format!("missing `{field}`"),
    })?;
    Id::from_str(&text).map_err(TxError::decode(field))
}

impl TransactionBuilder for RemoteBuilder {
    fn spend_tx(&self, params: &SpendTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::Spend, &SpendBody::new(params)?)
    }

    fn name_preclaim_tx(&self, params: &NamePreclaimTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::NamePreclaim, &PreclaimBody::from(params))
    }

    fn name_claim_tx(&self, params: &NameClaimTx) -> Result<UnsignedTx, TxError> {
        let name = self.rules.parse_name(&params.name)?;
        self.tx(TxKind::NameClaim, &ClaimBody::new(params, &name))
    }

    fn name_update_tx(&self, params: &NameUpdateTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::NameUpdate, &UpdateBody::from(params))
    }

    fn name_revoke_tx(&self, params: &NameRevokeTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::NameRevoke, &RevokeBody::from(params))
    }

    fn name_transfer_tx(&self, params: &NameTransferTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::NameTransfer, &TransferBody::from(params))
    }

    fn contract_create_tx(&self, params: &ContractCreateTx) -> Result<ContractCreated, TxError> {
        let kind = TxKind::ContractCreate;
        let reply = self.call(kind, &ContractCreateBody::from(params))?;
        Ok(ContractCreated {
            tx: parse_tx(kind, &reply.tx)?,
            contract_id: required_id(kind, "contract_id", reply.contract_id)?,
        })
    }

    fn contract_call_tx(&self, params: &ContractCallTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::ContractCall, &ContractCallBody::from(params))
    }

    fn oracle_register_tx(&self, params: &OracleRegisterTx) -> Result<UnsignedTx, TxError> {
        self.tx(TxKind::OracleRegister, &OracleRegisterBody::from(params))
    }

    fn oracle_extend_tx(&self, params: &OracleExtendTx) -> Result<UnsignedTx, TxError> {
        check_owner(&params.caller_id, &parse_oracle(&params.oracle_id)?)?;
        self.tx(TxKind::OracleExtend, &OracleExtendBody::from(params))
    }

    fn oracle_post_query_tx(&self, params: &OraclePostQueryTx) -> Result<QueryPosted, TxError> {
        let kind = TxKind::OracleQuery;
        let reply = self.call(kind, &OracleQueryBody::from(params))?;
        Ok(QueryPosted {
            tx: parse_tx(kind, &reply.tx)?,
            query_id: required_id(kind, "query_id", reply.query_id)?,
        })
    }

    fn oracle_respond_tx(&self, params: &OracleRespondTx) -> Result<UnsignedTx, TxError> {
        check_owner(&params.caller_id, &parse_oracle(&params.oracle_id)?)?;
        self.tx(TxKind::OracleResponse, &OracleRespondBody::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ttl;
    use serde_json::Value;
    use std::sync::Mutex;

    const ACCOUNT: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";
    const ORACLE: &str = "ok_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";
    const SPEND_TX: &str = "tx_+FEMAaDhMrjx3begTmO3+pZHmlS7xSWlMafxvAzkkhIZAwZ/sKDhMrjx3begTmO3+pZHmlS7xSWlMafxvAzkkhIZAwZ/sAGCTiCCAfQBhHRlc3Rcc29u";

    /// Records requests and answers every one with `reply`.
    struct Canned {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn status(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Authority for std::sync::Arc<Canned> {
        fn post(&self, endpoint: &str, body: &str) -> Result<String, RemoteError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), serde_json::from_str(body).unwrap()));
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(status) => Err(RemoteError::Status {
                    endpoint: endpoint.to_string(),
                    status: *status,
                    body: "nope".into(),
                }),
            }
        }
    }

    fn builder(canned: Canned) -> (RemoteBuilder, std::sync::Arc<Canned>) {
        let canned = std::sync::Arc::new(canned);
        (RemoteBuilder::new(canned.clone()), canned)
    }

    fn spend() -> SpendTx {
        SpendTx {
            sender_id: ACCOUNT.into(),
            recipient_id: ACCOUNT.into(),
            amount: 1,
            fee: 20_000,
            ttl: 500,
            nonce: 1,
            payload: b"test".to_vec(),
        }
    }

    #[test]
    fn spend_round_trip() {
        let reply = format!(r#"{{"tx":"{SPEND_TX}"}}"#);
        let (b, canned) = builder(Canned::ok(&reply));
        let tx = b.spend_tx(&spend()).unwrap();
        assert_eq!(tx.to_string(), SPEND_TX);

        let seen = canned.seen.lock().unwrap();
        let (endpoint, body) = &seen[0];
        assert_eq!(endpoint, "/debug/transactions/spend");
        assert_eq!(body["sender_id"], ACCOUNT);
        assert_eq!(body["amount"], 1);
        assert_eq!(body["payload"], "test");
    }

    #[test]
    fn status_error_is_passed_through() {
        let (b, _) = builder(Canned::status(400));
        let err = b.spend_tx(&spend()).unwrap_err();
        assert!(matches!(
            err,
            TxError::Remote(RemoteError::Status { status: 400, .. })
        ));
    }

    #[test]
    fn malformed_reply() {
        let (b, _) = builder(Canned::ok("not json"));
        assert!(matches!(
            b.spend_tx(&spend()).unwrap_err(),
            TxError::Remote(RemoteError::Reply { .. })
        ));

        let (b, _) = builder(Canned::ok(r#"{"tx":"tx_garbage"}"#));
        assert_eq!(b.spend_tx(&spend()).unwrap_err().field(), Some("tx"));
    }

    #[test]
    fn reply_of_wrong_kind_is_rejected() {
        let reply = format!(r#"{{"tx":"{SPEND_TX}"}}"#);
        let (b, _) = builder(Canned::ok(&reply));
        let p = NameRevokeTx {
            account_id: ACCOUNT.into(),
            name_id: "nm_2sFnPHi5ziAqhdApSpRBsYdomCahtmk3YGNZKYUTtUNpVSMccC".into(),
            nonce: 1,
            fee: 1,
            ttl: 0,
        };
        assert!(matches!(
            b.name_revoke_tx(&p).unwrap_err(),
            TxError::Remote(RemoteError::Reply { .. })
        ));
    }

    #[test]
    fn create_requires_contract_id() {
        let created = crate::tx::build_contract_create_tx(&create()).unwrap();
        let reply = format!(r#"{{"tx":"{}"}}"#, created.tx);
        let (b, _) = builder(Canned::ok(&reply));
        assert!(matches!(
            b.contract_create_tx(&create()).unwrap_err(),
            TxError::Remote(RemoteError::Reply { .. })
        ));

        let reply = format!(
            r#"{{"tx":"{}","contract_id":"{}"}}"#,
            created.tx, created.contract_id
        );
        let (b, _) = builder(Canned::ok(&reply));
        assert_eq!(b.contract_create_tx(&create()).unwrap(), created);
    }

    fn create() -> ContractCreateTx {
        ContractCreateTx {
            owner_id: ACCOUNT.into(),
            nonce: 1,
            code: vec![1],
            vm_version: 1,
            deposit: 0,
            amount: 0,
            gas: 1,
            gas_price: 1,
            call_data: Vec::new(),
            fee: 1,
            ttl: 0,
        }
    }

    #[test]
    fn claim_is_normalized_before_sending() {
        const CLAIM_TX: &str = "tx_+D4gAaDhMrjx3begTmO3+pZHmlS7xSWlMafxvAzkkhIZAwZ/sAGQdGVzdDEyM3Rlc3QudGVzdIISNIJOIIIB9NqLRKo=";
        let reply = format!(r#"{{"tx":"{CLAIM_TX}"}}"#);
        let (b, canned) = builder(Canned::ok(&reply));
        let mut p = NameClaimTx {
            account_id: ACCOUNT.into(),
            name: "Foo.Test".into(),
            name_salt: 1u64.into(),
            nonce: 1,
            fee: 1,
            ttl: 0,
        };
        b.name_claim_tx(&p).unwrap();
        let seen = canned.seen.lock().unwrap();
        assert_eq!(
            seen[0].1["name"],
            crate::names::encode_name("foo.test").as_str()
        );
        drop(seen);

        p.name = "foo.invalid".into();
        assert!(matches!(
            b.name_claim_tx(&p).unwrap_err(),
            TxError::InvalidName { .. }
        ));
        assert_eq!(canned.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn extend_checks_owner_before_posting() {
        let (b, canned) = builder(Canned::ok("{}"));
        let p = OracleExtendTx {
            oracle_id: ORACLE.into(),
            caller_id: crate::encoding::encode(crate::encoding::Prefix::AccountPubkey, &[3; 32]),
            oracle_ttl: Ttl::Delta(10),
            nonce: 1,
            fee: 1,
            ttl: 0,
        };
        assert_eq!(b.oracle_extend_tx(&p).unwrap_err().field(), Some("caller_id"));
        assert!(canned.seen.lock().unwrap().is_empty());
    }
}
