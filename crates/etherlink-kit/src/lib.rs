//! A clean, ergonomic Rust client for Etherlink.
//!
//! **etherlink-kit** provides a fluent API for interacting with
//! [Etherlink](https://etherlink.com), Tezos' EVM-compatible layer 2, with a
//! focus on safe-by-default transaction handling.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use etherlink_kit::Etherlink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), etherlink_kit::Error> {
//!     // Configure once
//!     let kit = Etherlink::testnet()
//!         .private_key("0x...")?
//!         .build()?;
//!
//!     // Check the bound account's native balance
//!     let balance = kit.account().balance().await?;
//!     println!("Balance: {balance} wei");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Design Principles
//!
//! 1. **Single entry point**: Everything hangs off the [`Etherlink`] client
//! 2. **Configure once**: Network and signing key set at client creation
//! 3. **Simulate, then execute**: Every write is dry run as an `eth_call`
//!    first; a revert surfaces as a typed error and nothing is submitted
//! 4. **No hidden retries**: Failures return immediately;
//!    [`TransportError::is_retryable`] is advisory for callers that want
//!    their own policy
//! 5. **Progressive disclosure**: Typed ERC-20/ERC-721 clients for the
//!    common cases, a JSON-ABI engine ([`Chain`]) for everything else
//!
//! # Sub-Clients
//!
//! | Client | Scope |
//! |--------|-------|
//! | [`Account`] | Native balance, message signing, wallet generation |
//! | [`Chain`] | Arbitrary contract reads and simulate-then-execute writes |
//! | [`Token`] | ERC-20 transfers, minting, burning, balances |
//! | [`Nft`] | ERC-721 minting, transfers, burns, collection deployment |
//!
//! # Networks
//!
//! | Network | Chain ID | Default RPC |
//! |---------|----------|-------------|
//! | Testnet | 128123 | `https://node.ghostnet.etherlink.com` |
//! | Mainnet | 42793 | `https://node.mainnet.etherlink.com` |
//!
//! The native currency on both is Tezos (XTZ) with 18 decimals.

pub mod client;
pub mod contract;
pub mod error;
pub mod tokens;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    CallError, ConfigError, DeploymentError, Error, SignerError, SimulationError, TransportError,
};
pub use types::*;

// Re-export contract types
pub use contract::{Chain, Simulation};

// Re-export client types
pub use client::{
    Account, Config, Etherlink, EtherlinkBuilder, EvmTransport, HttpTransport, TransportFuture,
};

// Re-export token types
pub use tokens::{Nft, Token};
