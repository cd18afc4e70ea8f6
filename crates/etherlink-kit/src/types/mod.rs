//! Core types for etherlink-kit.
//!
//! Parameter structs for every kit operation, plus the thin transaction
//! artifacts (receipts, deployments, generated accounts) the engines hand
//! back. All parameter structs deserialize from camelCase JSON, so the wire
//! shape the agent-tool layer receives maps onto them directly.

mod network;

use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

pub use network::{Currency, NATIVE_CURRENCY, Network};

// ============================================================================
// Generic contract call shapes
// ============================================================================

/// A read-only contract call: target, ABI, function, ordered arguments.
///
/// Arguments are JSON values coerced against the ABI's parameter types at
/// call time (addresses and big numbers as strings, composites as arrays).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParams {
    pub address: Address,
    pub abi: JsonAbi,
    pub function_name: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

/// A state-changing contract call: [`CallParams`] plus an optional native
/// value to attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteParams {
    pub address: Address,
    pub abi: JsonAbi,
    pub function_name: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    #[serde(default)]
    pub value: Option<U256>,
}

impl From<CallParams> for ExecuteParams {
    fn from(params: CallParams) -> Self {
        ExecuteParams {
            address: params.address,
            abi: params.abi,
            function_name: params.function_name,
            args: params.args,
            value: None,
        }
    }
}

// ============================================================================
// Token (ERC-20) parameters
// ============================================================================

/// Parameters for an ERC-20 `transfer`.
///
/// `amount` is in the token's smallest unit; this layer performs no decimal
/// scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
    pub token_address: Address,
    pub to: Address,
    pub amount: U256,
}

/// Parameters for an ERC-20 `mint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams {
    pub token_address: Address,
    pub to: Address,
    pub amount: U256,
}

/// Parameters for an ERC-20 `burn` (burns from the bound identity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnParams {
    pub token_address: Address,
    pub amount: U256,
}

/// Parameters for an ERC-20 `balanceOf` read.
///
/// When `owner_address` is `None`, the bound identity's own address is
/// queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceParams {
    pub token_address: Address,
    #[serde(default)]
    pub owner_address: Option<Address>,
}

// ============================================================================
// NFT (ERC-721) parameters
// ============================================================================

/// Parameters for deploying a new collection contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionParams {
    pub name: String,
    pub symbol: String,
}

/// Parameters for an ERC-721 `safeMint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintNftParams {
    pub collection_address: Address,
    pub to: Address,
    pub metadata_uri: String,
}

/// Parameters for an ERC-721 `safeTransferFrom`.
///
/// The sender is always the bound identity; only the recipient is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferNftParams {
    pub collection_address: Address,
    pub to: Address,
    pub token_id: U256,
}

/// Parameters for an ERC-721 `burn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnNftParams {
    pub collection_address: Address,
    pub token_id: U256,
}

/// Parameters for an ERC-721 `ownerOf` read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerParams {
    pub collection_address: Address,
    pub token_id: U256,
}

// ============================================================================
// Transaction artifacts
// ============================================================================

/// The finalized record of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: B256,
    /// Block the transaction landed in, if already included.
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Post-execution status: `true` means the transaction succeeded.
    pub success: bool,
    /// Address of the contract created by this transaction, if any.
    pub contract_address: Option<Address>,
}

/// Outcome of a successful contract deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub transaction_hash: B256,
    /// Address of the newly deployed contract.
    pub address: Address,
}

/// Fresh key material produced by [`Account::create`](crate::Account::create).
///
/// Holding this value is the only record of the secret key — it is not
/// persisted anywhere, and it does not become the kit's active signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAccount {
    pub address: Address,
    pub private_key: B256,
}

impl GeneratedAccount {
    /// The secret key as 0x-prefixed hex, the form accepted by kit
    /// construction.
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", alloy::hex::encode(self.private_key))
    }
}
