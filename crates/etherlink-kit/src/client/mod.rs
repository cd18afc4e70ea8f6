//! Client module for interacting with Etherlink.
//!
//! This module provides the core client infrastructure:
//!
//! - [`Etherlink`] — The main client, the single entry point for all
//!   operations
//! - [`EtherlinkBuilder`] — Fluent builder for configuring the client
//! - [`Config`] — Deserializable connection settings
//! - [`Account`] — Balance queries, message signing, and wallet generation
//!
//! # Transports
//!
//! All chain access goes through the [`EvmTransport`] trait. The default is
//! [`HttpTransport`], a signing JSON-RPC transport; tests and alternative
//! stacks can plug in their own implementation via
//! [`EtherlinkBuilder::transport`].

mod account;
mod etherlink;
pub(crate) mod transport;

pub use account::Account;
pub use etherlink::{Config, Etherlink, EtherlinkBuilder};
pub use transport::{EvmTransport, HttpTransport, TransportFuture};
