//! Reconstruct the swap of a transaction fetched from RPC
//!
//! Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example parse_swap_tx --release -- <signature>
//! ```

use anyhow::Context;
use sol_swap_parser::parse_swap_from_rpc;
use solana_client::rpc_client::RpcClient;
use solana_sdk::signature::Signature;
use std::str::FromStr;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let tx_sig = std::env::args().nth(1).unwrap_or_else(|| {
        "5tD8H3BGiGN5MBPcBBm2qTsdYduBk3kfjvLYR7bLyNdFxN6bBnXV4T394YDho47NErttWCZsLzsvEX4sQLAzBrmk".to_string()
    });

    println!("=== Swap Reconstruction ===\n");
    println!("Transaction Signature: {}\n", tx_sig);

    // 连接到 Solana RPC
    let rpc_url = std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://solana-rpc.publicnode.com".to_string());
    println!("Connecting to: {}", rpc_url);
    let client = RpcClient::new(rpc_url);

    let signature = Signature::from_str(&tx_sig).context("Failed to parse signature")?;

    let swap = match parse_swap_from_rpc(&client, &signature) {
        Ok(swap) => swap,
        Err(e) => {
            eprintln!("✗ Failed to reconstruct swap: {}", e);
            eprintln!("\nSet SOLANA_RPC_URL environment variable to use a custom endpoint.");
            std::process::exit(1);
        }
    };

    println!("✓ {} swap via {:?}", swap.swap_type, swap.amms);
    println!(
        "  in : {} x {} (decimals {})",
        swap.token_in_amount, swap.token_in_mint, swap.token_in_decimals
    );
    println!(
        "  out: {} x {} (decimals {})\n",
        swap.token_out_amount, swap.token_out_mint, swap.token_out_decimals
    );

    println!("{}", serde_json::to_string_pretty(&swap)?);
    Ok(())
}
