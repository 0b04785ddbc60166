//! Transaction builders, one module per family.
//!
//! Each `build_*` function validates its parameters, resolves the textual
//! identifiers, assembles the field list in schema order and serializes it.
//! Nothing here talks to a node: nonces, fees and ttls are taken as given.

pub mod contract;
pub mod name;
pub mod oracle;
pub mod spend;

use crate::encoding::{self, Prefix};
use crate::error::TxError;
use crate::rlp::Field;
use crate::schema::{self, TxKind, VSN};
use crate::types::{Id, Ttl, UnsignedTx};

pub use contract::{
    build_contract_call_tx, build_contract_create_tx, ContractCallTx, ContractCreateTx,
};
pub use name::{
    build_name_claim_tx, build_name_claim_tx_with, build_name_preclaim_tx, build_name_revoke_tx,
    build_name_transfer_tx, build_name_update_tx, NameClaimTx, NamePreclaimTx, NameRevokeTx,
    NameTransferTx, NameUpdateTx,
};
pub use oracle::{
    build_oracle_extend_tx, build_oracle_post_query_tx, build_oracle_register_tx,
    build_oracle_respond_tx, OracleExtendTx, OraclePostQueryTx, OracleRegisterTx,
    OracleRespondTx,
};
pub use spend::{build_spend_tx, SpendTx};

/// Decode `text` for `field`, accepting only `allowed` prefixes.
pub(crate) fn parse_id(field: &'static str, text: &str, allowed: &[Prefix]) -> Result<Id, TxError> {
    let (prefix, payload) =
        encoding::decode_as(text, allowed).map_err(TxError::decode(field))?;
    Id::new(prefix, payload).map_err(TxError::decode(field))
}

/// A name id is the 32-byte namehash, never the name text.
pub(crate) fn parse_name_id(field: &'static str, text: &str) -> Result<Id, TxError> {
    let id = parse_id(field, text, &[Prefix::Name])?;
    check_name_hash(field, &id)?;
    Ok(id)
}

pub(crate) fn check_name_hash(field: &'static str, id: &Id) -> Result<(), TxError> {
    if id.prefix() == Prefix::Name && id.as_bytes().len() != 32 {
        return Err(TxError::validation(
            field,
            format!(
                "name ids are 32-byte hashes, got {} bytes",
                id.as_bytes().len()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_nonce(nonce: u64) -> Result<(), TxError> {
    if nonce == 0 {
        return Err(TxError::validation("nonce", "must be at least 1"));
    }
    Ok(())
}

/// `[type, value]` of a ttl; a delta must be positive.
pub(crate) fn ttl_fields(field: &'static str, ttl: Ttl) -> Result<[Field; 2], TxError> {
    if ttl == Ttl::Delta(0) {
        return Err(TxError::validation(field, "relative ttl must be positive"));
    }
    Ok([Field::from(ttl.type_code()), Field::from(ttl.value())])
}

/// Response ttls only exist relative to the query.
pub(crate) fn response_ttl_fields(field: &'static str, ttl: Ttl) -> Result<[Field; 2], TxError> {
    if !ttl.is_delta() {
        return Err(TxError::validation(field, "response ttl must be relative"));
    }
    ttl_fields(field, ttl)
}

/// Serialize a version-1 `kind` transaction.
pub(crate) fn finish(kind: TxKind, fields: Vec<Field>) -> Result<UnsignedTx, TxError> {
    let bytes = schema::serialize(kind, VSN, &fields)?;
    log::debug!("built {kind} tx ({} bytes)", bytes.len());
    Ok(UnsignedTx::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    const SENDER: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

    #[test]
    fn parse_id_names_the_field() {
        let err = parse_id("owner_id", "ak_nope", &[Prefix::AccountPubkey]).unwrap_err();
        assert_eq!(err.field(), Some("owner_id"));
    }

    #[test]
    fn parse_id_wrong_prefix() {
        let err = parse_id("contract_id", SENDER, &[Prefix::ContractPubkey]).unwrap_err();
        assert!(matches!(
            err,
            TxError::Decode {
                field: "contract_id",
                source: DecodeError::UnexpectedPrefix { .. }
            }
        ));
    }

    #[test]
    fn name_id_must_be_hash() {
        let text = encoding::encode(Prefix::Name, b"foo.test");
        let err = parse_name_id("name_id", &text).unwrap_err();
        assert!(matches!(err, TxError::Validation { field: "name_id", .. }));
    }

    #[test]
    fn zero_nonce_rejected() {
        assert!(check_nonce(0).is_err());
        assert!(check_nonce(1).is_ok());
    }

    #[test]
    fn ttl_rules() {
        assert!(ttl_fields("oracle_ttl", Ttl::Delta(0)).is_err());
        assert!(ttl_fields("oracle_ttl", Ttl::Block(0)).is_ok());
        assert_eq!(
            ttl_fields("oracle_ttl", Ttl::Delta(500)).unwrap(),
            [Field::from(0u64), Field::from(500u64)]
        );
        assert!(response_ttl_fields("response_ttl", Ttl::Block(10)).is_err());
        assert!(response_ttl_fields("response_ttl", Ttl::Delta(10)).is_ok());
    }
}
