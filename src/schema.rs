//! Transaction object tags, versions and per-kind field schemas.
//!
//! [`serialize`] is the only way a field list becomes transaction bytes: it
//! checks the list against the schema of its `(tag, version)` before
//! encoding, and [`unpack_tx`] applies the same schema when reading back.

use crate::encoding::Prefix;
use crate::error::{DecodeError, TxError};
use crate::rlp::{self, Field, Item};

/// The only serialization version this crate produces.
pub const VSN: u64 = 1;

/// Maximum number of pointers a name may carry.
pub const MAX_POINTERS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Spend,
    OracleRegister,
    OracleQuery,
    OracleResponse,
    OracleExtend,
    NameClaim,
    NamePreclaim,
    NameUpdate,
    NameRevoke,
    NameTransfer,
    ContractCreate,
    ContractCall,
}

impl TxKind {
    pub const ALL: [TxKind; 12] = [
        TxKind::Spend,
        TxKind::OracleRegister,
        TxKind::OracleQuery,
        TxKind::OracleResponse,
        TxKind::OracleExtend,
        TxKind::NameClaim,
        TxKind::NamePreclaim,
        TxKind::NameUpdate,
        TxKind::NameRevoke,
        TxKind::NameTransfer,
        TxKind::ContractCreate,
        TxKind::ContractCall,
    ];

    /// Object tag, the first element of every serialized transaction.
    pub fn tag(self) -> u64 {
        match self {
            Self::Spend => 12,
            Self::OracleRegister => 22,
            Self::OracleQuery => 23,
            Self::OracleResponse => 24,
            Self::OracleExtend => 25,
            Self::NameClaim => 32,
            Self::NamePreclaim => 33,
            Self::NameUpdate => 34,
            Self::NameRevoke => 35,
            Self::NameTransfer => 36,
            Self::ContractCreate => 42,
            Self::ContractCall => 43,
        }
    }

    /// Kind for an object tag, `None` if the tag is not a transaction.
    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Snake-case kind name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Spend => "spend",
            Self::OracleRegister => "oracle_register",
            Self::OracleQuery => "oracle_query",
            Self::OracleResponse => "oracle_response",
            Self::OracleExtend => "oracle_extend",
            Self::NameClaim => "name_claim",
            Self::NamePreclaim => "name_preclaim",
            Self::NameUpdate => "name_update",
            Self::NameRevoke => "name_revoke",
            Self::NameTransfer => "name_transfer",
            Self::ContractCreate => "contract_create",
            Self::ContractCall => "contract_call",
        }
    }

    /// Field layout after `[tag, version]`, `None` for unknown versions.
    pub fn schema(self, version: u64) -> Option<&'static [FieldSpec]> {
        if version != VSN {
            return None;
        }
        Some(match self {
            Self::Spend => SPEND,
            Self::OracleRegister => ORACLE_REGISTER,
            Self::OracleQuery => ORACLE_QUERY,
            Self::OracleResponse => ORACLE_RESPONSE,
            Self::OracleExtend => ORACLE_EXTEND,
            Self::NameClaim => NAME_CLAIM,
            Self::NamePreclaim => NAME_PRECLAIM,
            Self::NameUpdate => NAME_UPDATE,
            Self::NameRevoke => NAME_REVOKE,
            Self::NameTransfer => NAME_TRANSFER,
            Self::ContractCreate => CONTRACT_CREATE,
            Self::ContractCall => CONTRACT_CALL,
        })
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Word,
    Bytes,
    Id(&'static [Prefix]),
    /// List of `[key bytes, target id]` pairs.
    Pointers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn f(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

use FieldType::{Bytes, Int, Pointers, Word};

const AK: FieldType = FieldType::Id(&[Prefix::AccountPubkey]);
const NM: FieldType = FieldType::Id(&[Prefix::Name]);
const OK: FieldType = FieldType::Id(&[Prefix::OraclePubkey]);

pub(crate) const POINTER_TARGETS: &[Prefix] = &[
    Prefix::AccountPubkey,
    Prefix::OraclePubkey,
    Prefix::ContractPubkey,
];

const SPEND: &[FieldSpec] = &[
    f("sender_id", AK),
    f("recipient_id", FieldType::Id(&[Prefix::AccountPubkey, Prefix::Name])),
    f("amount", Int),
    f("fee", Int),
    f("ttl", Int),
    f("nonce", Int),
    f("payload", Bytes),
];

const ORACLE_REGISTER: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("query_format", Bytes),
    f("response_format", Bytes),
    f("query_fee", Int),
    f("oracle_ttl_type", Int),
    f("oracle_ttl_value", Int),
    f("fee", Int),
    f("ttl", Int),
];

const ORACLE_QUERY: &[FieldSpec] = &[
    f("sender_id", AK),
    f("nonce", Int),
    f("oracle_id", OK),
    f("query", Bytes),
    f("query_fee", Int),
    f("query_ttl_type", Int),
    f("query_ttl_value", Int),
    f("response_ttl_type", Int),
    f("response_ttl_value", Int),
    f("fee", Int),
    f("ttl", Int),
];

const ORACLE_RESPONSE: &[FieldSpec] = &[
    f("oracle_id", OK),
    f("nonce", Int),
    f("query_id", FieldType::Id(&[Prefix::OracleQueryId])),
    f("response", Bytes),
    f("response_ttl_type", Int),
    f("response_ttl_value", Int),
    f("fee", Int),
    f("ttl", Int),
];

const ORACLE_EXTEND: &[FieldSpec] = &[
    f("oracle_id", OK),
    f("nonce", Int),
    f("oracle_ttl_type", Int),
    f("oracle_ttl_value", Int),
    f("fee", Int),
    f("ttl", Int),
];

const NAME_CLAIM: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("name", Bytes),
    f("name_salt", Word),
    f("fee", Int),
    f("ttl", Int),
];

const NAME_PRECLAIM: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("commitment_id", FieldType::Id(&[Prefix::Commitment])),
    f("fee", Int),
    f("ttl", Int),
];

const NAME_UPDATE: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("name_id", NM),
    f("name_ttl", Int),
    f("pointers", Pointers),
    f("client_ttl", Int),
    f("fee", Int),
    f("ttl", Int),
];

const NAME_REVOKE: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("name_id", NM),
    f("fee", Int),
    f("ttl", Int),
];

const NAME_TRANSFER: &[FieldSpec] = &[
    f("account_id", AK),
    f("nonce", Int),
    f("name_id", NM),
    f("recipient_id", AK),
    f("fee", Int),
    f("ttl", Int),
];

const CONTRACT_CREATE: &[FieldSpec] = &[
    f("owner_id", AK),
    f("nonce", Int),
    f("code", Bytes),
    f("vm_version", Int),
    f("fee", Int),
    f("ttl", Int),
    f("deposit", Int),
    f("amount", Int),
    f("gas", Int),
    f("gas_price", Int),
    f("call_data", Bytes),
];

const CONTRACT_CALL: &[FieldSpec] = &[
    f("caller_id", AK),
    f("nonce", Int),
    f("contract_id", FieldType::Id(&[Prefix::ContractPubkey])),
    f("vm_version", Int),
    f("fee", Int),
    f("ttl", Int),
    f("amount", Int),
    f("gas", Int),
    f("gas_price", Int),
    f("call_data", Bytes),
];

fn field_matches(ty: FieldType, field: &Field) -> bool {
    match (ty, field) {
        (Int, Field::Int(_)) | (Word, Field::Word(_)) | (Bytes, Field::Bytes(_)) => true,
        (FieldType::Id(allowed), Field::Id(id)) => allowed.contains(&id.prefix()),
        (Pointers, Field::List(items)) => items.iter().all(|item| {
            matches!(item, Field::List(pair)
                if matches!(pair.as_slice(), [Field::Bytes(_), Field::Id(id)]
                    if POINTER_TARGETS.contains(&id.prefix())))
        }),
        _ => false,
    }
}

/// Serialize `fields` as a `(kind, version)` transaction.
///
/// Fails with [`TxError::EncodingInvariant`] if the list does not have the
/// exact shape of the schema.
pub fn serialize(kind: TxKind, version: u64, fields: &[Field]) -> Result<Vec<u8>, TxError> {
    let schema = kind
        .schema(version)
        .ok_or_else(|| TxError::EncodingInvariant(format!("no schema for {kind} v{version}")))?;

    if schema.len() != fields.len() {
        return Err(TxError::EncodingInvariant(format!(
            "{kind} v{version} has {} fields, got {}",
            schema.len(),
            fields.len()
        )));
    }
    for (spec, field) in schema.iter().zip(fields) {
        if !field_matches(spec.ty, field) {
            return Err(TxError::EncodingInvariant(format!(
                "{kind} field `{}` expects {:?}, got {field:?}",
                spec.name, spec.ty
            )));
        }
    }

    let mut list = Vec::with_capacity(fields.len() + 2);
    list.push(Field::from(kind.tag()));
    list.push(Field::from(version));
    list.extend_from_slice(fields);
    Ok(rlp::encode_list(&list))
}

/// A transaction read back into its schema-labelled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedTx {
    pub kind: TxKind,
    pub version: u64,
    pub fields: Vec<(&'static str, Item)>,
}

impl UnpackedTx {
    /// Field by schema name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, item)| item)
    }
}

/// Decode transaction bytes and check them against the schema.
pub fn unpack_tx(bytes: &[u8]) -> Result<UnpackedTx, DecodeError> {
    let item = rlp::decode(bytes)?;
    let items = item
        .as_list()
        .ok_or_else(|| DecodeError::Rlp("transaction must be a list".into()))?;

    let (tag, rest) = items
        .split_first()
        .ok_or_else(|| DecodeError::Rlp("empty transaction".into()))?;
    let (version, body) = rest
        .split_first()
        .ok_or_else(|| DecodeError::Rlp("missing version".into()))?;

    let tag = tag.to_u64()?;
    let version = version.to_u64()?;
    let kind =
        TxKind::from_tag(tag).ok_or_else(|| DecodeError::Rlp(format!("unknown tag {tag}")))?;
    let schema = kind
        .schema(version)
        .ok_or_else(|| DecodeError::Rlp(format!("unsupported {kind} version {version}")))?;

    if schema.len() != body.len() {
        return Err(DecodeError::Rlp(format!(
            "{kind} has {} fields, found {}",
            schema.len(),
            body.len()
        )));
    }

    let mut fields = Vec::with_capacity(body.len());
    for (spec, item) in schema.iter().zip(body) {
        check_item(spec, item)?;
        fields.push((spec.name, item.clone()));
    }

    Ok(UnpackedTx {
        kind,
        version,
        fields,
    })
}

fn check_item(spec: &FieldSpec, item: &Item) -> Result<(), DecodeError> {
    let bad = |what: &str| DecodeError::Rlp(format!("field `{}`: {what}", spec.name));
    match spec.ty {
        Int => item.to_u128().map(|_| ()),
        Word => item.to_word().map(|_| ()),
        Bytes => item.as_bytes().map(|_| ()).ok_or_else(|| bad("expected bytes")),
        FieldType::Id(_) => {
            let bytes = item.as_bytes().ok_or_else(|| bad("expected an id"))?;
            if bytes.len() != 32 {
                return Err(bad("id must be 32 bytes"));
            }
            Ok(())
        }
        Pointers => {
            let pointers = item.as_list().ok_or_else(|| bad("expected a list"))?;
            for pointer in pointers {
                match pointer.as_list() {
                    Some([Item::Bytes(_), Item::Bytes(id)]) if id.len() == 32 => {}
                    _ => return Err(bad("malformed pointer")),
                }
            }
            Ok(())
        }
    }
}
