//! Quickstart - Essential Etherlink operations
//!
//! Covers: account basics, ERC-20 reads, and the two-phase write path
//!
//! Run: cargo run --example quickstart
//!
//! Set environment variables:
//!   ETHERLINK_PRIVATE_KEY=0x...     (required)
//!   ETHERLINK_TOKEN_ADDRESS=0x...   (optional, enables the ERC-20 sections)

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use etherlink_kit::*;

// ============================================================================
// 1. Account basics
// ============================================================================

async fn account_example(kit: &Etherlink) -> Result<(), Error> {
    println!("=== Account Example ===\n");

    let account = kit.account();
    println!("address: {}", account.address());
    println!("network: {} (chain id {})", kit.network(), kit.network().chain_id());
    println!("balance: {} wei", account.balance().await?);

    // Signing is local, no network round trip.
    let signature = account.sign_message("gm etherlink")?;
    println!("signed a message: {signature:?}");

    // Fresh key material; the running kit keeps its own signer.
    let fresh = account.create();
    println!("generated a new account: {}", fresh.address);

    Ok(())
}

// ============================================================================
// 2. ERC-20 reads
// ============================================================================

async fn token_example(kit: &Etherlink, token_address: Address) -> Result<(), Error> {
    println!("\n=== Token Example ===\n");

    // Omitting the owner queries the kit's own address.
    let balance = kit
        .token()
        .balance_of(&BalanceParams {
            token_address,
            owner_address: None,
        })
        .await?;

    println!("token balance: {balance}");

    Ok(())
}

// ============================================================================
// 3. Two-phase writes: simulate, inspect, then (optionally) submit
// ============================================================================

async fn simulate_example(kit: &Etherlink, token_address: Address) -> Result<(), Error> {
    println!("\n=== Simulate Example ===\n");

    let abi: JsonAbi = serde_json::from_str(
        r#"[{
            "type": "function",
            "name": "transfer",
            "inputs": [
                { "name": "to", "type": "address" },
                { "name": "amount", "type": "uint256" }
            ],
            "outputs": [{ "name": "", "type": "bool" }],
            "stateMutability": "nonpayable"
        }]"#,
    )
    .unwrap();

    // A zero-token transfer to ourselves: a harmless dry-run target.
    let params = ExecuteParams {
        address: token_address,
        abi,
        function_name: "transfer".to_string(),
        args: vec![
            serde_json::json!(kit.address().to_string()),
            serde_json::json!("0"),
        ],
        value: None,
    };

    let simulation = kit.chain().simulate(&params).await?;
    println!(
        "dry run passed; the call would return {} bytes",
        simulation.return_data().len()
    );

    // To broadcast the exact request that was just simulated:
    //     let tx_hash = kit.chain().submit(simulation).await?;
    // `kit.chain().execute(&params)` does both phases in one call.

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Error> {
    println!("etherlink-kit Quickstart Examples\n");

    let kit = match Etherlink::from_env() {
        Ok(kit) => kit,
        Err(e) => {
            println!("{e}");
            println!("\nSet ETHERLINK_PRIVATE_KEY to run this example.");
            println!("Get testnet XTZ at: https://faucet.etherlink.com/");
            return Ok(());
        }
    };

    account_example(&kit).await?;

    match std::env::var("ETHERLINK_TOKEN_ADDRESS") {
        Ok(raw) => {
            let token_address: Address = raw
                .parse()
                .expect("ETHERLINK_TOKEN_ADDRESS is not a valid address");

            token_example(&kit, token_address).await?;
            simulate_example(&kit, token_address).await?;
        }
        Err(_) => {
            println!("\n---");
            println!("Set ETHERLINK_TOKEN_ADDRESS to run the ERC-20 sections.");
        }
    }

    Ok(())
}
