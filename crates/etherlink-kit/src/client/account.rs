//! Identity operations: the bound address, its native balance, message
//! signing, and fresh key generation.

use std::sync::Arc;

use alloy::primitives::{Address, B256, Signature, U256};
use alloy::signers::SignerSync;
use alloy::signers::local::PrivateKeySigner;
use tracing::debug;

use crate::client::transport::EvmTransport;
use crate::error::{Error, SignerError};
use crate::types::GeneratedAccount;

/// Identity operations for the configured signer.
///
/// Obtained from [`Etherlink::account`](crate::Etherlink::account). Every
/// method operates on the bound identity; [`Account::create`] is the one
/// exception — it hands back fresh key material without touching the running
/// client's signer.
///
/// # Example
///
/// ```rust,no_run
/// # use etherlink_kit::Etherlink;
/// # async fn example() -> Result<(), etherlink_kit::Error> {
/// let kit = Etherlink::testnet()
///     .private_key("0x...")?
///     .build()?;
///
/// let account = kit.account();
/// println!("address: {}", account.address());
/// println!("balance: {} wei", account.balance().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Account {
    transport: Arc<dyn EvmTransport>,
    signer: PrivateKeySigner,
}

impl Account {
    pub(crate) fn new(transport: Arc<dyn EvmTransport>, signer: PrivateKeySigner) -> Self {
        Self { transport, signer }
    }

    /// The address of the bound identity.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Native XTZ balance of the bound identity, in wei.
    ///
    /// Always queries the client's own address. For ERC-20 balances use
    /// [`Token::balance_of`](crate::Token::balance_of).
    pub async fn balance(&self) -> Result<U256, Error> {
        let balance = self.transport.balance(self.address()).await?;
        Ok(balance)
    }

    /// Sign an arbitrary message with the bound identity (EIP-191 personal
    /// sign).
    ///
    /// Signing is local and involves no network round trip.
    pub fn sign_message(&self, message: &str) -> Result<Signature, Error> {
        let signature = self
            .signer
            .sign_message_sync(message.as_bytes())
            .map_err(|e| SignerError::SigningFailed(e.to_string()))?;
        Ok(signature)
    }

    /// Generate a brand-new account.
    ///
    /// The returned [`GeneratedAccount`] is the only copy of the key
    /// material: it is not persisted, and the running client keeps signing
    /// with its own key. Callers must store the private key securely.
    pub fn create(&self) -> GeneratedAccount {
        let fresh = PrivateKeySigner::random();
        let address = fresh.address();
        debug!(%address, "generated new account");

        GeneratedAccount {
            address,
            private_key: B256::from_slice(fresh.to_bytes().as_slice()),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
