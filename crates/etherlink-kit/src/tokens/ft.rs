//! Fungible token client (ERC-20).

use alloy::primitives::{Address, B256, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use tracing::debug;

use crate::contract::Chain;
use crate::error::{CallError, Error};
use crate::types::{BalanceParams, BurnParams, MintParams, TransferParams};

sol! {
    /// Minimal ERC-20 surface: transfers plus the mint/burn extensions
    /// exposed by OpenZeppelin-style tokens.
    interface IErc20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function mint(address to, uint256 amount) external;
        function burn(uint256 amount) external;
        function balanceOf(address owner) external view returns (uint256);
    }
}

// =============================================================================
// Token
// =============================================================================

/// Client for a standard ERC-20 token contract.
///
/// Create via [`Etherlink::token()`](crate::Etherlink::token). Writes follow
/// the same simulate-then-execute protocol as [`Chain`]: the transfer is dry
/// run first and a revert surfaces before anything is signed.
///
/// Amounts are raw token units — for a token with 18 decimals, one whole
/// token is `1_000_000_000_000_000_000`.
///
/// # Example
///
/// ```rust,no_run
/// use alloy::primitives::{U256, address};
/// use etherlink_kit::{Etherlink, TransferParams};
///
/// # async fn example() -> Result<(), etherlink_kit::Error> {
/// let kit = Etherlink::testnet().private_key("0x...")?.build()?;
///
/// let tx_hash = kit
///     .token()
///     .transfer(&TransferParams {
///         token_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
///         to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
///         amount: U256::from(1_000_000_000_000_000_000_u128),
///     })
///     .await?;
/// println!("transfer submitted: {tx_hash}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Token {
    chain: Chain,
}

impl Token {
    pub(crate) fn new(chain: Chain) -> Self {
        Self { chain }
    }

    // =========================================================================
    // Write Methods
    // =========================================================================

    /// Transfer tokens from the bound account to a recipient.
    pub async fn transfer(&self, params: &TransferParams) -> Result<B256, Error> {
        debug!(
            token = %params.token_address,
            to = %params.to,
            amount = %params.amount,
            "transferring fungible tokens"
        );
        let call = IErc20::transferCall {
            to: params.to,
            amount: params.amount,
        };
        self.write(params.token_address, call.abi_encode()).await
    }

    /// Mint new tokens to a recipient.
    ///
    /// The token contract must expose a `mint(address,uint256)` function and
    /// the bound account must hold the minter role; otherwise the dry run
    /// reverts and nothing is submitted.
    pub async fn mint(&self, params: &MintParams) -> Result<B256, Error> {
        debug!(
            token = %params.token_address,
            to = %params.to,
            amount = %params.amount,
            "minting fungible tokens"
        );
        let call = IErc20::mintCall {
            to: params.to,
            amount: params.amount,
        };
        self.write(params.token_address, call.abi_encode()).await
    }

    /// Burn tokens from the bound account's own balance.
    pub async fn burn(&self, params: &BurnParams) -> Result<B256, Error> {
        debug!(
            token = %params.token_address,
            amount = %params.amount,
            "burning fungible tokens"
        );
        let call = IErc20::burnCall {
            amount: params.amount,
        };
        self.write(params.token_address, call.abi_encode()).await
    }

    // =========================================================================
    // View Methods
    // =========================================================================

    /// Get the raw token balance of an owner.
    ///
    /// When `owner_address` is `None` the bound account's own balance is
    /// queried.
    pub async fn balance_of(&self, params: &BalanceParams) -> Result<U256, Error> {
        let owner = params
            .owner_address
            .unwrap_or_else(|| self.chain.signer_address());
        let call = IErc20::balanceOfCall { owner };

        let data = self
            .chain
            .read_raw(params.token_address, call.abi_encode())
            .await?;
        let balance = <IErc20::balanceOfCall as SolCall>::abi_decode_returns(&data)
            .map_err(|e| CallError::Decode(e.to_string()))?;
        Ok(balance)
    }

    async fn write(&self, to: Address, data: Vec<u8>) -> Result<B256, Error> {
        let simulation = self.chain.simulate_raw(to, data, None).await?;
        self.chain.submit(simulation).await
    }
}

// =============================================================================
// Tests
// =============================================================================
