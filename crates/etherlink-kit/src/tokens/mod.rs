//! Token helpers for ERC-20 (fungible) and ERC-721 (non-fungible) contracts.
//!
//! Both clients ride on the same simulate-then-execute core as
//! [`Chain`](crate::Chain): every write is dry run first, and a revert
//! surfaces as a typed error before anything is signed or broadcast.
//!
//! # Fungible Tokens (ERC-20)
//!
//! ```rust,no_run
//! use alloy::primitives::{U256, address};
//! use etherlink_kit::{BalanceParams, Etherlink, TransferParams};
//!
//! # async fn example() -> Result<(), etherlink_kit::Error> {
//! let kit = Etherlink::testnet().private_key("0x...")?.build()?;
//! let token = kit.token();
//!
//! // Query the agent's own balance (owner defaults to the bound account)
//! let balance = token
//!     .balance_of(&BalanceParams {
//!         token_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
//!         owner_address: None,
//!     })
//!     .await?;
//! println!("balance: {balance}");
//!
//! // Transfer raw units (1 token at 18 decimals)
//! token
//!     .transfer(&TransferParams {
//!         token_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
//!         to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
//!         amount: U256::from(1_000_000_000_000_000_000_u128),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Non-Fungible Tokens (ERC-721)
//!
//! ```rust,no_run
//! use alloy::primitives::{U256, address};
//! use etherlink_kit::{Etherlink, MintNftParams, OwnerParams};
//!
//! # async fn example() -> Result<(), etherlink_kit::Error> {
//! let kit = Etherlink::testnet().private_key("0x...")?.build()?;
//! let nft = kit.nft();
//!
//! // Mint into an existing collection
//! nft.mint(&MintNftParams {
//!     collection_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
//!     to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
//!     metadata_uri: "https://example.com/metadata/1.json".to_string(),
//! })
//! .await?;
//!
//! // Look up a token's owner
//! let owner = nft
//!     .owner_of(&OwnerParams {
//!         collection_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
//!         token_id: U256::from(1u64),
//!     })
//!     .await?;
//! println!("owned by {owner}");
//! # Ok(())
//! # }
//! ```

mod ft;
mod nft;

pub use ft::*;
pub use nft::*;
