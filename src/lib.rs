//! Offline transaction encoding and identifier derivation for aeternity.
//!
//! Builds the canonical bytes of unsigned transactions (spend, naming,
//! contracts, oracles) and derives the identifiers that follow from them,
//! without talking to a node. The same operations are available through a
//! node's debug endpoints, and both paths must agree byte for byte.
//!
//! # Quick start
//!
//! ```
//! use aeternity_tx::{NativeBuilder, SpendTx, TransactionBuilder};
//!
//! let builder = NativeBuilder::new();
//! let tx = builder.spend_tx(&SpendTx {
//!     sender_id: "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688".into(),
//!     recipient_id: "ak_2iBPH7HUz3cSDVEUWiHg76MZJ6tZooVNBmmxcgVK6VV8KAE688".into(),
//!     amount: 1,
//!     fee: 20_000,
//!     ttl: 500,
//!     nonce: 1,
//!     payload: b"test".to_vec(),
//! })?;
//! assert!(tx.to_string().starts_with("tx_"));
//! println!("hash: {}", tx.hash());
//! # Ok::<(), aeternity_tx::TxError>(())
//! ```
//!
//! # Modules
//!
//! - [`api`] -- the [`TransactionBuilder`] capability and [`NativeBuilder`]
//! - [`remote`] -- [`RemoteBuilder`] over a node's debug endpoints (feature `remote`)
//! - [`tx`] -- one `build_*` function and parameter struct per transaction kind
//! - [`encoding`] -- `prefix_` + base58/base64 checksummed identifiers
//! - [`rlp`] -- the recursive-length-prefix codec
//! - [`schema`] -- object tags, field layouts, [`unpack_tx`]
//! - [`hash`] / [`names`] -- derived identifiers: commitments, name ids,
//!   contract ids, query ids, oracle ids, transaction hashes
//! - [`salt`] -- injectable salt sources
//! - [`types`] -- [`Id`], [`Ttl`], [`Salt`], [`Pointer`], [`UnsignedTx`]
//!
//! # Feature flags
//!
//! - `rng` (default) -- [`OsSalt`], salts from the operating system
//! - `remote` (default) -- [`RemoteBuilder`] and its HTTP authority

pub mod api;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod names;
#[cfg(feature = "remote")]
pub mod remote;
pub mod rlp;
pub mod salt;
pub mod schema;
pub mod tx;
pub mod types;

pub use api::{NativeBuilder, TransactionBuilder};
pub use encoding::Prefix;
pub use error::{DecodeError, RemoteError, TxError};
pub use names::{NameCommitment, NameRules};
#[cfg(feature = "remote")]
pub use remote::{http::HttpAuthority, Authority, RemoteBuilder};
#[cfg(feature = "rng")]
pub use salt::OsSalt;
pub use salt::{FixedSalt, SaltSource};
pub use schema::{unpack_tx, TxKind, UnpackedTx};
pub use tx::*;
pub use types::{ContractCreated, Id, Pointer, QueryPosted, Salt, Ttl, UnsignedTx};
