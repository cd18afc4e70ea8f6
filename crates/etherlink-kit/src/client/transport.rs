//! Node transport: the RPC boundary between the kit and Etherlink.
//!
//! [`EvmTransport`] abstracts the four node interactions every sub-client
//! needs: balance reads, `eth_call` executions (reads and dry runs),
//! authenticated sends, and receipt lookup. The production implementation is
//! [`HttpTransport`], an alloy HTTP provider carrying the signer's wallet so
//! that submitted transactions are filled and signed locally. Tests substitute
//! their own implementation to script node behavior without a network.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportError as AlloyTransportError};
use tracing::debug;

use crate::error::{ConfigError, TransportError};
use crate::types::Receipt;

// ============================================================================
// EvmTransport Trait
// ============================================================================

/// Boxed future returned by [`EvmTransport`] methods.
pub type TransportFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, TransportError>> + Send + 'a>>;

/// Node access for the sub-clients: reads, dry runs, sends, receipt waits.
///
/// The trait is object-safe so the client can hold any implementation behind
/// an `Arc<dyn EvmTransport>`. [`HttpTransport`] is the production
/// implementation; tests inject a scripted double through
/// [`EtherlinkBuilder::transport`](crate::EtherlinkBuilder::transport).
///
/// # Example Implementation
///
/// ```rust,ignore
/// use etherlink_kit::{EvmTransport, TransportFuture};
///
/// #[derive(Debug)]
/// struct InstrumentedTransport<T> {
///     inner: T,
/// }
///
/// impl<T: EvmTransport> EvmTransport for InstrumentedTransport<T> {
///     fn send(&self, request: TransactionRequest) -> TransportFuture<'_, B256> {
///         metrics::count("etherlink.send");
///         self.inner.send(request)
///     }
///     // ... delegate the remaining methods
/// }
/// ```
pub trait EvmTransport: Send + Sync + fmt::Debug {
    /// Native balance of `address` at the latest block, in wei.
    fn balance(&self, address: Address) -> TransportFuture<'_, U256>;

    /// Execute `request` as an `eth_call` and return the raw return data.
    ///
    /// Used both for contract reads and for dry-running a write before it is
    /// submitted.
    fn call(&self, request: TransactionRequest) -> TransportFuture<'_, Bytes>;

    /// Fill, sign, and broadcast `request`; resolves to the transaction hash.
    fn send(&self, request: TransactionRequest) -> TransportFuture<'_, B256>;

    /// Poll the node until the receipt for `tx_hash` is available.
    fn wait_for_receipt(&self, tx_hash: B256) -> TransportFuture<'_, Receipt>;
}

/// Implement `EvmTransport` for `Arc<dyn EvmTransport>` for convenience.
impl EvmTransport for Arc<dyn EvmTransport> {
    fn balance(&self, address: Address) -> TransportFuture<'_, U256> {
        (**self).balance(address)
    }

    fn call(&self, request: TransactionRequest) -> TransportFuture<'_, Bytes> {
        (**self).call(request)
    }

    fn send(&self, request: TransactionRequest) -> TransportFuture<'_, B256> {
        (**self).send(request)
    }

    fn wait_for_receipt(&self, tx_hash: B256) -> TransportFuture<'_, Receipt> {
        (**self).wait_for_receipt(tx_hash)
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// How many times to poll for a receipt before giving up.
const RECEIPT_POLL_ATTEMPTS: u32 = 20;

/// Delay between receipt polls. Etherlink soft-confirms in under a second,
/// so 500ms keeps the wait short without hammering the node.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Production transport backed by an alloy HTTP provider.
///
/// The provider carries the signer's wallet: [`EvmTransport::send`] fills gas,
/// nonce, and chain id locally, signs, and broadcasts the raw transaction.
/// Construction validates the URL but performs no I/O.
pub struct HttpTransport {
    provider: DynProvider,
    url: String,
}

impl HttpTransport {
    /// Connect to an RPC endpoint with the given wallet attached.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRpcUrl`] if `rpc_url` is not a valid URL.
    pub fn new(rpc_url: &str, wallet: EthereumWallet) -> Result<Self, ConfigError> {
        let url: alloy::transports::http::reqwest::Url =
            rpc_url.parse().map_err(|e| ConfigError::InvalidRpcUrl {
                url: rpc_url.to_string(),
                reason: format!("{e}"),
            })?;

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();

        Ok(Self {
            provider,
            url: rpc_url.to_string(),
        })
    }

    /// The endpoint this transport talks to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl EvmTransport for HttpTransport {
    fn balance(&self, address: Address) -> TransportFuture<'_, U256> {
        Box::pin(async move {
            debug!(%address, "fetching native balance");
            self.provider
                .get_balance(address)
                .await
                .map_err(into_transport_error)
        })
    }

    fn call(&self, request: TransactionRequest) -> TransportFuture<'_, Bytes> {
        Box::pin(async move {
            debug!(to = ?request.to, "executing eth_call");
            self.provider
                .call(request)
                .await
                .map_err(into_transport_error)
        })
    }

    fn send(&self, request: TransactionRequest) -> TransportFuture<'_, B256> {
        Box::pin(async move {
            let pending = self
                .provider
                .send_transaction(request)
                .await
                .map_err(into_transport_error)?;
            let tx_hash = *pending.tx_hash();
            debug!(%tx_hash, "transaction broadcast");
            Ok(tx_hash)
        })
    }

    fn wait_for_receipt(&self, tx_hash: B256) -> TransportFuture<'_, Receipt> {
        Box::pin(async move {
            for attempt in 1..=RECEIPT_POLL_ATTEMPTS {
                if let Some(receipt) = self
                    .provider
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(into_transport_error)?
                {
                    debug!(%tx_hash, attempt, "receipt found");
                    return Ok(receipt_from_rpc(receipt));
                }
                tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
            }

            Err(TransportError::ReceiptTimeout {
                tx_hash,
                attempts: RECEIPT_POLL_ATTEMPTS,
            })
        })
    }
}

// ============================================================================
// Error and Receipt Mapping
// ============================================================================

/// Collapse alloy's transport error tree into [`TransportError`].
///
/// Node-reported failures keep their JSON-RPC code and message so that
/// callers can classify reverts; everything else surfaces as an HTTP-level
/// failure with the original description.
fn into_transport_error(err: AlloyTransportError) -> TransportError {
    match err {
        RpcError::ErrorResp(payload) => TransportError::Rpc {
            code: payload.code,
            message: payload.message.to_string(),
        },
        RpcError::DeserError { err, .. } => TransportError::InvalidResponse(err.to_string()),
        RpcError::NullResp => {
            TransportError::InvalidResponse("node returned a null response".to_string())
        }
        other => TransportError::http(other.to_string()),
    }
}

/// Project an alloy receipt onto the kit's [`Receipt`].
fn receipt_from_rpc(receipt: alloy::rpc::types::TransactionReceipt) -> Receipt {
    Receipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        success: receipt.status(),
        contract_address: receipt.contract_address,
    }
}

// ============================================================================
// Mock Transport (test support)
// ============================================================================


// ============================================================================
// Tests
// ============================================================================
