//! Build a contract create and a first call, optionally cross-checked
//! against a node.
//!
//! Usage:
//!   cargo run --example deploy_contract -- <OWNER_ak_...> <NONCE> <BYTECODE_cb_...> [NODE_HOST:PORT]
//!
//! With a node address, the same parameters are also sent to the node's
//! debug endpoints and both encodings are compared.

use std::env;

use aeternity_tx::encoding::{self, Prefix};
use aeternity_tx::{ContractCallTx, ContractCreateTx, NativeBuilder, TransactionBuilder};

fn main() {
    let args: Vec<String> = env::args().collect();
    if !(4..=5).contains(&args.len()) {
        eprintln!("usage: deploy_contract <OWNER> <NONCE> <BYTECODE_cb_...> [NODE_HOST:PORT]");
        std::process::exit(1);
    }

    let nonce: u64 = args[2].parse().unwrap_or_else(|_| {
        eprintln!("nonce must be a u64");
        std::process::exit(1);
    });
    let (_, code) = encoding::decode_as(&args[3], &[Prefix::ContractBytearray]).unwrap_or_else(|e| {
        eprintln!("bad bytecode: {e}");
        std::process::exit(1);
    });

    let create = ContractCreateTx {
        owner_id: args[1].clone(),
        nonce,
        code,
        vm_version: 1,
        deposit: 0,
        amount: 0,
        gas: 1_000_000,
        gas_price: 1_000_000_000,
        call_data: Vec::new(),
        fee: 1_400_000_000_000_000,
        ttl: 0,
    };

    let builder = NativeBuilder::new();
    let created = builder.contract_create_tx(&create).unwrap_or_else(|e| {
        eprintln!("cannot build create: {e}");
        std::process::exit(1);
    });
    println!("create:   {}", created.tx);
    println!("contract: {}", created.contract_id);

    let call = ContractCallTx {
        caller_id: args[1].clone(),
        contract_id: created.contract_id.to_string(),
        nonce: nonce + 1,
        vm_version: 1,
        amount: 0,
        gas: 1_000_000,
        gas_price: 1_000_000_000,
        call_data: Vec::new(),
        fee: 500_000_000_000_000,
        ttl: 0,
    };
    match builder.contract_call_tx(&call) {
        Ok(tx) => println!("call:     {tx}"),
        Err(e) => eprintln!("cannot build call: {e}"),
    }

    if let Some(addr) = args.get(4) {
        compare_with_node(addr, &create, &created);
    }
}

#[cfg(feature = "remote")]
fn compare_with_node(addr: &str, create: &ContractCreateTx, native: &aeternity_tx::ContractCreated) {
    use aeternity_tx::{HttpAuthority, RemoteBuilder};

    let authority = HttpAuthority::new(addr, "/v2").unwrap_or_else(|e| {
        eprintln!("node error: {e}");
        std::process::exit(1);
    });
    let remote = RemoteBuilder::new(authority);
    match remote.contract_create_tx(create) {
        Ok(r) if &r == native => println!("node agrees"),
        Ok(r) => {
            eprintln!("node disagrees:");
            eprintln!("  tx:       {}", r.tx);
            eprintln!("  contract: {}", r.contract_id);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("node error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "remote"))]
fn compare_with_node(_: &str, _: &ContractCreateTx, _: &aeternity_tx::ContractCreated) {
    eprintln!("enable the 'remote' feature to compare with a node");
}
