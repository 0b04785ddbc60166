//! Build an unsigned spend transaction offline.
//!
//! Usage:
//!   cargo run --example spend -- <SENDER_ak_...> <RECIPIENT_ak_or_nm_...> <AMOUNT> <NONCE>
//!
//! Prints the `tx_` envelope and its `th_` hash. Signing and broadcasting
//! happen elsewhere.

use std::env;

use aeternity_tx::{unpack_tx, NativeBuilder, SpendTx, TransactionBuilder};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        eprintln!("usage: spend <SENDER> <RECIPIENT> <AMOUNT> <NONCE>");
        std::process::exit(1);
    }

    let amount: u128 = args[3].parse().unwrap_or_else(|_| {
        eprintln!("amount must be an unsigned integer (aettos)");
        std::process::exit(1);
    });
    let nonce: u64 = args[4].parse().unwrap_or_else(|_| {
        eprintln!("nonce must be a u64");
        std::process::exit(1);
    });

    let params = SpendTx {
        sender_id: args[1].clone(),
        recipient_id: args[2].clone(),
        amount,
        fee: 16_840_000_000_000,
        ttl: 0,
        nonce,
        payload: Vec::new(),
    };

    let tx = NativeBuilder::new().spend_tx(&params).unwrap_or_else(|e| {
        eprintln!("cannot build: {e}");
        std::process::exit(1);
    });

    println!("tx:    {tx}");
    println!("hash:  {}", tx.hash());
    println!("bytes: {}", tx.len());
    if let Ok(unpacked) = unpack_tx(tx.as_bytes()) {
        for (name, item) in &unpacked.fields {
            println!("  {name}: {item:?}");
        }
    }
}
