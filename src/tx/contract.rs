//! Contract create and call transactions.
//!
//! Bytecode and call data come from the compiler and are opaque here.

use crate::encoding::Prefix;
use crate::error::TxError;
use crate::hash;
use crate::rlp::Field;
use crate::schema::TxKind;
use crate::types::{ContractCreated, UnsignedTx};

use super::{check_nonce, finish, parse_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreateTx {
    pub owner_id: String,
    pub nonce: u64,
    pub code: Vec<u8>,
    pub vm_version: u64,
    pub deposit: u128,
    pub amount: u128,
    pub gas: u64,
    pub gas_price: u128,
    pub call_data: Vec<u8>,
    pub fee: u128,
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCallTx {
    pub caller_id: String,
    pub contract_id: String,
    pub nonce: u64,
    pub vm_version: u64,
    pub amount: u128,
    pub gas: u64,
    pub gas_price: u128,
    pub call_data: Vec<u8>,
    pub fee: u128,
    pub ttl: u64,
}

fn check_vm_version(vm_version: u64) -> Result<(), TxError> {
    if vm_version == 0 {
        return Err(TxError::validation("vm_version", "must be at least 1"));
    }
    Ok(())
}

/// Layout: `[42, 1, owner_id, nonce, code, vm_version, fee, ttl, deposit,
/// amount, gas, gas_price, call_data]`
///
/// Also returns the contract address, derived from owner and nonce.
pub fn build_contract_create_tx(params: &ContractCreateTx) -> Result<ContractCreated, TxError> {
    check_nonce(params.nonce)?;
    check_vm_version(params.vm_version)?;
    if params.code.is_empty() {
        return Err(TxError::validation("code", "bytecode is empty"));
    }

    let owner = parse_id("owner_id", &params.owner_id, &[Prefix::AccountPubkey])?;
    let contract_id = hash::contract_id(&owner, params.nonce);

    let tx = finish(
        TxKind::ContractCreate,
        vec![
            owner.into(),
            params.nonce.into(),
            Field::Bytes(params.code.clone()),
            params.vm_version.into(),
            params.fee.into(),
            params.ttl.into(),
            params.deposit.into(),
            params.amount.into(),
            params.gas.into(),
            params.gas_price.into(),
            Field::Bytes(params.call_data.clone()),
        ],
    )?;

    Ok(ContractCreated { tx, contract_id })
}

/// Layout: `[43, 1, caller_id, nonce, contract_id, vm_version, fee, ttl,
/// amount, gas, gas_price, call_data]`
pub fn build_contract_call_tx(params: &ContractCallTx) -> Result<UnsignedTx, TxError> {
    check_nonce(params.nonce)?;
    check_vm_version(params.vm_version)?;

    let caller = parse_id("caller_id", &params.caller_id, &[Prefix::AccountPubkey])?;
    let contract = parse_id("contract_id", &params.contract_id, &[Prefix::ContractPubkey])?;

    finish(
        TxKind::ContractCall,
        vec![
            caller.into(),
            params.nonce.into(),
            contract.into(),
            params.vm_version.into(),
            params.fee.into(),
            params.ttl.into(),
            params.amount.into(),
            params.gas.into(),
            params.gas_price.into(),
            Field::Bytes(params.call_data.clone()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::unpack_tx;
    use crate::types::Id;

    const OWNER: &str = "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688";

    fn create() -> ContractCreateTx {
        ContractCreateTx {
            owner_id: OWNER.into(),
            nonce: 1,
            code: vec![0xCB; 120],
            vm_version: 1,
            deposit: 4,
            amount: 1,
            gas: 1_600_000 - 21_000,
            gas_price: 1,
            call_data: vec![0x11; 40],
            fee: 20_000,
            ttl: 500,
        }
    }

    fn call(contract_id: &Id) -> ContractCallTx {
        ContractCallTx {
            caller_id: OWNER.into(),
            contract_id: contract_id.to_string(),
            nonce: 2,
            vm_version: 1,
            amount: 1,
            gas: 1_579_000,
            gas_price: 1,
            call_data: vec![0x22; 8],
            fee: 20_000,
            ttl: 500,
        }
    }

    #[test]
    fn create_returns_derived_contract_id() {
        let created = build_contract_create_tx(&create()).unwrap();
        assert_eq!(
            created.contract_id.to_string(),
            "ct_LPmnHZzvaKmmALbdpEmcC1sRB5YHgirYkb1Sh4bLTjRm4AorU"
        );
        let owner: Id = OWNER.parse().unwrap();
        assert_eq!(created.contract_id, hash::contract_id(&owner, 1));
    }

    #[test]
    fn create_layout() {
        let created = build_contract_create_tx(&create()).unwrap();
        let unpacked = unpack_tx(created.tx.as_bytes()).unwrap();
        assert_eq!(unpacked.kind, TxKind::ContractCreate);
        assert_eq!(unpacked.get("code").unwrap().as_bytes().unwrap(), &[0xCB; 120][..]);
        assert_eq!(unpacked.get("deposit").unwrap().to_u128().unwrap(), 4);
        assert_eq!(unpacked.get("gas").unwrap().to_u64().unwrap(), 1_579_000);
        assert_eq!(unpacked.get("call_data").unwrap().as_bytes().unwrap().len(), 40);
    }

    #[test]
    fn call_targets_created_contract() {
        let created = build_contract_create_tx(&create()).unwrap();
        let tx = build_contract_call_tx(&call(&created.contract_id)).unwrap();
        let unpacked = unpack_tx(tx.as_bytes()).unwrap();
        assert_eq!(
            unpacked.get("contract_id").unwrap().as_bytes().unwrap(),
            created.contract_id.as_bytes()
        );
    }

    #[test]
    fn create_validation() {
        let mut p = create();
        p.code.clear();
        assert_eq!(build_contract_create_tx(&p).unwrap_err().field(), Some("code"));

        let mut p = create();
        p.vm_version = 0;
        assert_eq!(
            build_contract_create_tx(&p).unwrap_err().field(),
            Some("vm_version")
        );

        let mut p = create();
        p.nonce = 0;
        assert_eq!(build_contract_create_tx(&p).unwrap_err().field(), Some("nonce"));
    }

    #[test]
    fn empty_call_data_is_allowed() {
        let mut p = create();
        p.call_data.clear();
        assert!(build_contract_create_tx(&p).is_ok());
    }

    #[test]
    fn call_rejects_account_as_contract() {
        let owner: Id = OWNER.parse().unwrap();
        let err = build_contract_call_tx(&call(&owner)).unwrap_err();
        assert_eq!(err.field(), Some("contract_id"));
    }
}
