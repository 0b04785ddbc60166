//! High-level API - one [`TransactionBuilder`] capability with two
//! strategies: [`NativeBuilder`] encodes locally, and
//! [`RemoteBuilder`](crate::remote::RemoteBuilder) asks a node to do the same
//! encoding server-side. Both must produce identical bytes for identical
//! parameters.

use crate::error::TxError;
use crate::names::{NameCommitment, NameRules};
use crate::salt::SaltSource;
use crate::tx::{self, *};
use crate::types::{ContractCreated, QueryPosted, UnsignedTx};

/// Build every transaction kind from a parameter aggregate.
pub trait TransactionBuilder {
    fn spend_tx(&self, params: &SpendTx) -> Result<UnsignedTx, TxError>;

    fn name_preclaim_tx(&self, params: &NamePreclaimTx) -> Result<UnsignedTx, TxError>;

    fn name_claim_tx(&self, params: &NameClaimTx) -> Result<UnsignedTx, TxError>;

    fn name_update_tx(&self, params: &NameUpdateTx) -> Result<UnsignedTx, TxError>;

    fn name_revoke_tx(&self, params: &NameRevokeTx) -> Result<UnsignedTx, TxError>;

    fn name_transfer_tx(&self, params: &NameTransferTx) -> Result<UnsignedTx, TxError>;

    fn contract_create_tx(&self, params: &ContractCreateTx) -> Result<ContractCreated, TxError>;

    fn contract_call_tx(&self, params: &ContractCallTx) -> Result<UnsignedTx, TxError>;

    fn oracle_register_tx(&self, params: &OracleRegisterTx) -> Result<UnsignedTx, TxError>;

    fn oracle_extend_tx(&self, params: &OracleExtendTx) -> Result<UnsignedTx, TxError>;

    fn oracle_post_query_tx(&self, params: &OraclePostQueryTx) -> Result<QueryPosted, TxError>;

    fn oracle_respond_tx(&self, params: &OracleRespondTx) -> Result<UnsignedTx, TxError>;
}

/// Offline builder. Holds no state beyond its name rules.
#[derive(Debug, Clone, Default)]
pub struct NativeBuilder {
    rules: NameRules,
}

impl NativeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_rules(rules: NameRules) -> Self {
        Self { rules }
    }

    pub fn name_rules(&self) -> &NameRules {
        &self.rules
    }

    /// Commit to `name` with a salt drawn from `source`; feed the result's
    /// `commitment_id` to the preclaim and its `salt` to the claim.
    pub fn commit_name(
        &self,
        name: &str,
        source: &mut dyn SaltSource,
    ) -> Result<NameCommitment, TxError> {
        NameCommitment::generate(&self.rules, name, source)
    }
}

impl TransactionBuilder for NativeBuilder {
    fn spend_tx(&self, params: &SpendTx) -> Result<UnsignedTx, TxError> {
        tx::build_spend_tx(params)
    }

    fn name_preclaim_tx(&self, params: &NamePreclaimTx) -> Result<UnsignedTx, TxError> {
        tx::build_name_preclaim_tx(params)
    }

    fn name_claim_tx(&self, params: &NameClaimTx) -> Result<UnsignedTx, TxError> {
        tx::build_name_claim_tx_with(params, &self.rules)
    }

    fn name_update_tx(&self, params: &NameUpdateTx) -> Result<UnsignedTx, TxError> {
        tx::build_name_update_tx(params)
    }

    fn name_revoke_tx(&self, params: &NameRevokeTx) -> Result<UnsignedTx, TxError> {
        tx::build_name_revoke_tx(params)
    }

    fn name_transfer_tx(&self, params: &NameTransferTx) -> Result<UnsignedTx, TxError> {
        tx::build_name_transfer_tx(params)
    }

    fn contract_create_tx(&self, params: &ContractCreateTx) -> Result<ContractCreated, TxError> {
        tx::build_contract_create_tx(params)
    }

    fn contract_call_tx(&self, params: &ContractCallTx) -> Result<UnsignedTx, TxError> {
        tx::build_contract_call_tx(params)
    }

    fn oracle_register_tx(&self, params: &OracleRegisterTx) -> Result<UnsignedTx, TxError> {
        tx::build_oracle_register_tx(params)
    }

    fn oracle_extend_tx(&self, params: &OracleExtendTx) -> Result<UnsignedTx, TxError> {
        tx::build_oracle_extend_tx(params)
    }

    fn oracle_post_query_tx(&self, params: &OraclePostQueryTx) -> Result<QueryPosted, TxError> {
        tx::build_oracle_post_query_tx(params)
    }

    fn oracle_respond_tx(&self, params: &OracleRespondTx) -> Result<UnsignedTx, TxError> {
        tx::build_oracle_respond_tx(params)
    }
}
