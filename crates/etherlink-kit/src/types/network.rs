//! Network profiles for Etherlink.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The native currency of a [`Network`] (name, symbol, decimals).
pub const NATIVE_CURRENCY: Currency = Currency {
    name: "Tezos",
    symbol: "XTZ",
    decimals: 18,
};

/// Descriptor for a network's native currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Currency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// The Etherlink network the kit is bound to.
///
/// Exactly two profiles exist; each carries its chain id, a default RPC
/// endpoint, and a block-explorer URL. A kit selects one at construction
/// and never switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Etherlink mainnet (production network).
    Mainnet,
    /// Etherlink testnet (Ghostnet-backed testing network).
    #[default]
    Testnet,
}

impl Network {
    /// Returns true if this is mainnet.
    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }

    /// Returns true if this is testnet.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Returns the network identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// EVM chain id of this network.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 42793,
            Network::Testnet => 128123,
        }
    }

    /// Human-readable network name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "Etherlink Mainnet",
            Network::Testnet => "Etherlink Testnet",
        }
    }

    /// Canonical public RPC endpoint for this network.
    ///
    /// Used by the builder presets; an explicitly configured RPC URL always
    /// takes precedence.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://node.mainnet.etherlink.com",
            Network::Testnet => "https://node.ghostnet.etherlink.com",
        }
    }

    /// Block-explorer base URL for this network.
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://explorer.etherlink.com",
            Network::Testnet => "https://testnet-explorer.etherlink.com",
        }
    }

    /// The native currency descriptor (XTZ, 18 decimals, on both networks).
    pub fn currency(&self) -> Currency {
        NATIVE_CURRENCY
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}
