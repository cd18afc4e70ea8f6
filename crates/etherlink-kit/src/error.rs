//! Error types for etherlink-kit.
//!
//! This module provides comprehensive error types for all etherlink-kit operations.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by most operations
//!   - [`ConfigError`] — Invalid or missing construction input
//!   - [`TransportError`] — Network/RPC failures while talking to the chain
//!   - [`SimulationError`] — A dry run says the call would fail
//!   - [`CallError`] — Read or ABI failures, or a rejected submission
//!   - [`DeploymentError`] — A deployment produced no usable contract address
//!   - [`SignerError`] — Local signing failures
//!
//! # Error Handling Examples
//!
//! ## Pattern Matching on Simulation Failures
//!
//! ```rust,no_run
//! use etherlink_kit::*;
//!
//! # async fn example(kit: &Etherlink, params: ExecuteParams) -> Result<(), Error> {
//! match kit.chain().execute(&params).await {
//!     Ok(hash) => println!("Submitted: {hash}"),
//!     Err(Error::Simulation(SimulationError::Reverted { reason })) => {
//!         println!("Would revert, nothing was submitted: {reason}");
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking Retryable Errors
//!
//! This crate never retries on its own; [`TransportError::is_retryable`] is
//! advisory for callers that want to.
//!
//! ```rust,no_run
//! use etherlink_kit::TransportError;
//!
//! fn should_retry(err: &TransportError) -> bool {
//!     err.is_retryable()
//! }
//! ```

use alloy::primitives::B256;
use thiserror::Error;

/// Invalid or missing construction input.
///
/// Always fatal to construction and raised before any chain access, so a
/// misconfigured kit never reaches the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("A valid 0x-prefixed private key is required for initialization")]
    MissingPrivateKey,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC URL is required for initialization")]
    MissingRpcUrl,

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Unknown network '{0}': expected 'mainnet' or 'testnet'")]
    UnknownNetwork(String),

    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error(
        "Collection bytecode is not configured: compile an ERC-721 artifact and embed its creation code"
    )]
    MissingCollectionBytecode,
}

// ============================================================================
// Transport Errors
// ============================================================================

/// Network or node-level failure while talking to the chain.
///
/// Raised by the transport during reads, simulations, submissions, and
/// receipt waits. This layer performs no retries; [`is_retryable`] is an
/// advisory classification for callers.
///
/// [`is_retryable`]: TransportError::is_retryable
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    // ─── Network ───
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ─── Node ───
    #[error("RPC error: {message} (code: {code})")]
    Rpc { code: i64, message: String },

    // ─── Receipt ───
    #[error("No receipt for transaction {tx_hash} after {attempts} attempts")]
    ReceiptTimeout { tx_hash: B256, attempts: u32 },
}

impl TransportError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(_) => true,
            TransportError::ReceiptTimeout { .. } => true,
            // Retry only on internal server errors; other node responses
            // (reverts, invalid params) are deterministic.
            TransportError::Rpc { code, .. } => *code == -32603,
            TransportError::InvalidResponse(_) => false,
        }
    }

    /// Create an HTTP-level error.
    pub fn http(message: impl Into<String>) -> Self {
        TransportError::Http(message.into())
    }

    /// Create a node-level RPC error.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        TransportError::Rpc {
            code,
            message: message.into(),
        }
    }
}

// ============================================================================
// Protocol Errors
// ============================================================================

/// A dry run indicates the call would fail.
///
/// `execute` short-circuits on this error: the transaction is never
/// submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Simulation reverted: {reason}")]
    Reverted { reason: String },
}

/// A read failed, the ABI did not line up, or a prepared call was rejected
/// at submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("Function '{0}' not found in the provided ABI")]
    FunctionNotFound(String),

    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument {index} for '{name}': {reason}")]
    InvalidArgument {
        name: String,
        index: usize,
        reason: String,
    },

    #[error("Unresolvable ABI type for parameter '{param}': {reason}")]
    AbiType { param: String, reason: String },

    #[error("Read reverted: {reason}")]
    Reverted { reason: String },

    #[error("Failed to encode call data: {0}")]
    Encode(String),

    #[error("Failed to decode return data: {0}")]
    Decode(String),

    #[error("Submission rejected: {reason}")]
    Rejected { reason: String },
}

/// A deployment did not yield a usable contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeploymentError {
    #[error("Deployment {tx_hash} failed: no contract address in receipt")]
    NoContractAddress { tx_hash: B256 },

    #[error("Deployment rejected: {reason}")]
    Rejected { reason: String },
}

/// Error during signing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for etherlink-kit operations.
///
/// Every failure keeps its domain type and propagates uncaught; only the
/// agent-tool boundary (the `etherlink-agent-tools` crate) flattens errors
/// into text.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ─── Transport ───
    #[error(transparent)]
    Transport(#[from] TransportError),

    // ─── Two-phase protocol ───
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    // ─── Signing ───
    #[error(transparent)]
    Signer(#[from] SignerError),
}

impl Error {
    /// Returns true if this failure happened before any chain access.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns true if a dry run blocked a submission.
    pub fn is_simulation(&self) -> bool {
        matches!(self, Error::Simulation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ConfigError tests
    // ========================================================================

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::MissingPrivateKey.to_string(),
            "A valid 0x-prefixed private key is required for initialization"
        );
        assert_eq!(
            ConfigError::InvalidPrivateKey("odd length".to_string()).to_string(),
            "Invalid private key: odd length"
        );
        assert_eq!(
            ConfigError::MissingRpcUrl.to_string(),
            "RPC URL is required for initialization"
        );
        assert_eq!(
            ConfigError::InvalidRpcUrl {
                url: "not a url".to_string(),
                reason: "relative URL without a base".to_string(),
            }
            .to_string(),
            "Invalid RPC URL 'not a url': relative URL without a base"
        );
        assert_eq!(
            ConfigError::UnknownNetwork("ghostnet".to_string()).to_string(),
            "Unknown network 'ghostnet': expected 'mainnet' or 'testnet'"
        );
        assert_eq!(
            ConfigError::MissingEnv("ETHERLINK_PRIVATE_KEY").to_string(),
            "Environment variable ETHERLINK_PRIVATE_KEY is not set"
        );
    }

    // ========================================================================
    // TransportError tests
    // ========================================================================

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            TransportError::http("connection refused").to_string(),
            "HTTP error: connection refused"
        );
        assert_eq!(
            TransportError::rpc(3, "execution reverted: paused").to_string(),
            "RPC error: execution reverted: paused (code: 3)"
        );
        assert_eq!(
            TransportError::InvalidResponse("missing result".to_string()).to_string(),
            "Invalid response: missing result"
        );

        let timeout = TransportError::ReceiptTimeout {
            tx_hash: B256::ZERO,
            attempts: 10,
        };
        assert!(timeout.to_string().starts_with("No receipt for transaction 0x"));
        assert!(timeout.to_string().ends_with("after 10 attempts"));
    }

    #[test]
    fn test_transport_error_retryable() {
        assert!(TransportError::http("timed out").is_retryable());
        assert!(
            TransportError::ReceiptTimeout {
                tx_hash: B256::ZERO,
                attempts: 10,
            }
            .is_retryable()
        );
        assert!(TransportError::rpc(-32603, "internal error").is_retryable());
        assert!(!TransportError::rpc(3, "execution reverted").is_retryable());
        assert!(!TransportError::InvalidResponse("garbage".to_string()).is_retryable());
    }

    // ========================================================================
    // SimulationError tests
    // ========================================================================

    #[test]
    fn test_simulation_error_display() {
        assert_eq!(
            SimulationError::Reverted {
                reason: "ERC20: transfer amount exceeds balance".to_string(),
            }
            .to_string(),
            "Simulation reverted: ERC20: transfer amount exceeds balance"
        );
    }

    // ========================================================================
    // CallError tests
    // ========================================================================

    #[test]
    fn test_call_error_display() {
        assert_eq!(
            CallError::FunctionNotFound("vote".to_string()).to_string(),
            "Function 'vote' not found in the provided ABI"
        );
        assert_eq!(
            CallError::ArgumentCount {
                name: "transfer".to_string(),
                expected: 2,
                actual: 1,
            }
            .to_string(),
            "Function 'transfer' expects 2 argument(s), got 1"
        );
        assert_eq!(
            CallError::InvalidArgument {
                name: "transfer".to_string(),
                index: 0,
                reason: "invalid address checksum".to_string(),
            }
            .to_string(),
            "Invalid argument 0 for 'transfer': invalid address checksum"
        );
        assert_eq!(
            CallError::Encode("length mismatch".to_string()).to_string(),
            "Failed to encode call data: length mismatch"
        );
        assert_eq!(
            CallError::Decode("buffer overrun".to_string()).to_string(),
            "Failed to decode return data: buffer overrun"
        );
        assert_eq!(
            CallError::Rejected {
                reason: "nonce too low".to_string(),
            }
            .to_string(),
            "Submission rejected: nonce too low"
        );
    }

    // ========================================================================
    // DeploymentError tests
    // ========================================================================

    #[test]
    fn test_deployment_error_display() {
        let err = DeploymentError::NoContractAddress { tx_hash: B256::ZERO };
        assert!(err.to_string().starts_with("Deployment 0x"));
        assert!(err.to_string().ends_with("no contract address in receipt"));

        assert_eq!(
            DeploymentError::Rejected {
                reason: "intrinsic gas too low".to_string(),
            }
            .to_string(),
            "Deployment rejected: intrinsic gas too low"
        );
    }

    // ========================================================================
    // Main Error tests
    // ========================================================================

    #[test]
    fn test_error_is_transparent() {
        // The top-level error adds no prefix of its own.
        let err: Error = ConfigError::MissingRpcUrl.into();
        assert_eq!(err.to_string(), "RPC URL is required for initialization");

        let err: Error = SimulationError::Reverted {
            reason: "paused".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Simulation reverted: paused");

        let err: Error = SignerError::SigningFailed("bad digest".to_string()).into();
        assert_eq!(err.to_string(), "Signing failed: bad digest");
    }

    #[test]
    fn test_error_predicates() {
        let config: Error = ConfigError::MissingPrivateKey.into();
        assert!(config.is_config());
        assert!(!config.is_simulation());

        let simulation: Error = SimulationError::Reverted {
            reason: "nope".to_string(),
        }
        .into();
        assert!(simulation.is_simulation());
        assert!(!simulation.is_config());
    }

    #[test]
    fn test_error_matching() {
        let err: Error = TransportError::rpc(3, "execution reverted").into();
        match err {
            Error::Transport(TransportError::Rpc { code, .. }) => assert_eq!(code, 3),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
