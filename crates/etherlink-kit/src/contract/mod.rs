//! Dynamic contract engine: JSON-ABI reads, dry runs, and
//! simulate-then-execute writes.
//!
//! Every state-changing call goes through the same two-phase protocol:
//! the exact transaction that would be submitted is first executed as an
//! `eth_call` dry run, and only if the node accepts it is it signed and
//! broadcast. A failed dry run short-circuits — nothing reaches the chain
//! and the revert reason comes back typed. The [`Simulation`] handle carries
//! the prepared request between the phases and is consumed on submission,
//! so a stale dry run can never back a second write.
//!
//! # Example
//!
//! ```rust,no_run
//! # use etherlink_kit::{Etherlink, ExecuteParams};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let kit = Etherlink::testnet().private_key("0x...")?.build()?;
//! let params: ExecuteParams = serde_json::from_value(serde_json::json!({
//!     "address": "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
//!     "abi": [{
//!         "type": "function", "name": "vote", "stateMutability": "nonpayable",
//!         "inputs": [{ "name": "proposal", "type": "uint256" }], "outputs": []
//!     }],
//!     "functionName": "vote",
//!     "args": ["1"]
//! }))?;
//!
//! let tx_hash = kit.chain().execute(&params).await?;
//! println!("submitted: {tx_hash}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use tracing::{debug, info, warn};

use crate::client::transport::EvmTransport;
use crate::error::{CallError, DeploymentError, Error, SimulationError, TransportError};
use crate::types::{CallParams, Deployment, ExecuteParams, Network, Receipt};

mod abi;

// ============================================================================
// Simulation
// ============================================================================

/// A write that has passed its dry run.
///
/// Holds the exact request the dry run evaluated; [`Chain::submit`] sends
/// that request byte for byte. Submission consumes the value, so one dry run
/// can never back two writes — prepare a fresh one for every submission.
#[derive(Debug)]
pub struct Simulation {
    request: TransactionRequest,
    return_data: Bytes,
}

impl Simulation {
    /// The request that will be submitted, unchanged.
    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    /// Raw return data produced by the dry run.
    pub fn return_data(&self) -> &Bytes {
        &self.return_data
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Low-level contract operations against arbitrary ABIs.
///
/// Obtained from [`Etherlink::chain`](crate::Etherlink::chain). The typed
/// [`Token`](crate::Token) and [`Nft`](crate::Nft) clients are built on the
/// same two-phase core.
#[derive(Clone)]
pub struct Chain {
    transport: Arc<dyn EvmTransport>,
    signer_address: Address,
    network: Network,
}

impl Chain {
    pub(crate) fn new(
        transport: Arc<dyn EvmTransport>,
        signer_address: Address,
        network: Network,
    ) -> Self {
        Self {
            transport,
            signer_address,
            network,
        }
    }

    /// Call a view function and decode the result into JSON.
    ///
    /// Numbers decode as decimal strings so 256-bit values survive the JSON
    /// representation; a single return value is unwrapped, multiple values
    /// come back as an array.
    pub async fn read(&self, params: &CallParams) -> Result<serde_json::Value, Error> {
        let func = abi::resolve_function(&params.abi, &params.function_name, params.args.len())?;
        let values = abi::coerce_args(func, &params.args)?;
        let data = abi::encode_input(func, &values)?;

        debug!(address = %params.address, function = %params.function_name, "reading contract");
        let output = self.read_raw(params.address, data).await?;
        Ok(abi::decode_output(func, &output)?)
    }

    /// Dry-run a write without submitting anything.
    ///
    /// On success the returned [`Simulation`] holds the exact request a
    /// subsequent [`submit`](Chain::submit) will send. A revert during the
    /// dry run surfaces as [`SimulationError::Reverted`] and nothing is
    /// signed or broadcast.
    pub async fn simulate(&self, params: &ExecuteParams) -> Result<Simulation, Error> {
        let func = abi::resolve_function(&params.abi, &params.function_name, params.args.len())?;
        let values = abi::coerce_args(func, &params.args)?;
        let data = abi::encode_input(func, &values)?;

        debug!(address = %params.address, function = %params.function_name, "simulating contract write");
        self.simulate_raw(params.address, data, params.value).await
    }

    /// Submit a previously simulated write.
    ///
    /// Consumes the [`Simulation`] and broadcasts its request unchanged.
    /// Returns the transaction hash without waiting for inclusion; use
    /// [`wait_for_receipt`](Chain::wait_for_receipt) if you need the outcome.
    pub async fn submit(&self, simulation: Simulation) -> Result<B256, Error> {
        let tx_hash = self
            .transport
            .send(simulation.request)
            .await
            .map_err(|err| match node_rejection(err) {
                Ok(reason) => Error::Call(CallError::Rejected { reason }),
                Err(transport) => Error::Transport(transport),
            })?;

        info!(%tx_hash, "contract write submitted");
        Ok(tx_hash)
    }

    /// Simulate a write and, if the dry run passes, submit it.
    ///
    /// This is the standard write path: a failing simulation short-circuits
    /// with the revert reason and nothing reaches the chain.
    pub async fn execute(&self, params: &ExecuteParams) -> Result<B256, Error> {
        let simulation = self.simulate(params).await?;
        self.submit(simulation).await
    }

    /// Wait for the receipt of a submitted transaction.
    pub async fn wait_for_receipt(&self, tx_hash: B256) -> Result<Receipt, Error> {
        let receipt = self.transport.wait_for_receipt(tx_hash).await?;
        Ok(receipt)
    }

    /// Event monitoring is not available over plain HTTP transports.
    ///
    /// Kept for interface parity: logs a warning and returns immediately.
    /// Point a websocket-capable client at the node if you need live events.
    pub fn monitor_events(&self, address: Address, event_name: &str) {
        warn!(
            %address,
            event_name,
            "event monitoring over HTTP is not supported; no events will be delivered"
        );
    }

    // ========================================================================
    // Two-Phase Core
    // ========================================================================

    /// Execute pre-encoded calldata as an `eth_call`.
    pub(crate) async fn read_raw(&self, to: Address, data: Vec<u8>) -> Result<Bytes, Error> {
        let request = self.call_request(to, data, None);

        self.transport
            .call(request)
            .await
            .map_err(|err| match node_rejection(err) {
                Ok(reason) => Error::Call(CallError::Reverted { reason }),
                Err(transport) => Error::Transport(transport),
            })
    }

    /// Dry-run pre-encoded calldata and capture the prepared request.
    pub(crate) async fn simulate_raw(
        &self,
        to: Address,
        data: Vec<u8>,
        value: Option<U256>,
    ) -> Result<Simulation, Error> {
        let request = self.call_request(to, data, value);

        let return_data = self
            .transport
            .call(request.clone())
            .await
            .map_err(|err| match node_rejection(err) {
                Ok(reason) => Error::Simulation(SimulationError::Reverted { reason }),
                Err(transport) => Error::Transport(transport),
            })?;

        Ok(Simulation {
            request,
            return_data,
        })
    }

    /// Deploy a contract from its creation code (constructor args already
    /// appended) and wait for the address.
    ///
    /// Deployments skip the dry-run phase: creation is evaluated by the node
    /// on submission and the receipt carries the verdict.
    pub(crate) async fn deploy(&self, code: Vec<u8>) -> Result<Deployment, Error> {
        let mut request = TransactionRequest::default()
            .from(self.signer_address)
            .with_deploy_code(code);
        request.set_chain_id(self.network.chain_id());

        let tx_hash = self
            .transport
            .send(request)
            .await
            .map_err(|err| match node_rejection(err) {
                Ok(reason) => Error::Deployment(DeploymentError::Rejected { reason }),
                Err(transport) => Error::Transport(transport),
            })?;

        let receipt = self.transport.wait_for_receipt(tx_hash).await?;
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::NoContractAddress { tx_hash })?;

        info!(%tx_hash, %address, "contract deployed");
        Ok(Deployment {
            transaction_hash: tx_hash,
            address,
        })
    }

    /// The bound identity's address, used as `from` on every request.
    pub(crate) fn signer_address(&self) -> Address {
        self.signer_address
    }

    fn call_request(&self, to: Address, data: Vec<u8>, value: Option<U256>) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .from(self.signer_address)
            .to(to)
            .input(Bytes::from(data).into());
        request.set_chain_id(self.network.chain_id());
        if let Some(value) = value {
            request.set_value(value);
        }
        request
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("signer_address", &self.signer_address)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

/// Split a transport failure into "the node evaluated and rejected the
/// request" versus "the node was unreachable or misbehaved".
fn node_rejection(err: TransportError) -> Result<String, TransportError> {
    match err {
        TransportError::Rpc { message, .. } => Ok(message),
        other => Err(other),
    }
}

// ============================================================================
// Tests
// ============================================================================
