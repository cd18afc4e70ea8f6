//! The main Etherlink client.

use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use serde::Deserialize;

use crate::contract::Chain;
use crate::error::ConfigError;
use crate::tokens::{Nft, Token};
use crate::types::Network;

use super::account::Account;
use super::transport::{EvmTransport, HttpTransport};

/// Connection settings, typically deserialized from a JSON or TOML document.
///
/// `rpcUrl` and `privateKey` are required; `network` defaults to testnet.
///
/// # Example
///
/// ```rust,no_run
/// use etherlink_kit::{Config, Etherlink};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config: Config = serde_json::from_str(
///     r#"{ "rpcUrl": "https://node.ghostnet.etherlink.com", "privateKey": "0x..." }"#,
/// )?;
/// let kit = Etherlink::from_config(config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    #[serde(default)]
    pub network: Option<Network>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("network", &self.network)
            .finish()
    }
}

/// The main client for interacting with Etherlink.
///
/// `Etherlink` is the single entry point: it binds one signing identity to
/// one network and hands out the focused sub-clients ([`account`],
/// [`chain`], [`token`], [`nft`]) that do the actual work.
///
/// Every state-changing operation follows the same protocol: the exact
/// transaction is dry run against the node first, and only if the node
/// accepts it is it signed and submitted. A revert therefore surfaces as a
/// typed error before anything reaches the chain.
///
/// # Example
///
/// ```rust,no_run
/// use etherlink_kit::Etherlink;
///
/// #[tokio::main]
/// async fn main() -> Result<(), etherlink_kit::Error> {
///     let kit = Etherlink::testnet()
///         .private_key("0x...")?
///         .build()?;
///
///     let balance = kit.account().balance().await?;
///     println!("Balance: {balance} (wei, 18 decimals)");
///
///     Ok(())
/// }
/// ```
///
/// [`account`]: Etherlink::account
/// [`chain`]: Etherlink::chain
/// [`token`]: Etherlink::token
/// [`nft`]: Etherlink::nft
#[derive(Clone)]
pub struct Etherlink {
    transport: Arc<dyn EvmTransport>,
    signer: PrivateKeySigner,
    network: Network,
}

impl Etherlink {
    /// Create a builder for Etherlink mainnet (chain id 42793).
    pub fn mainnet() -> EtherlinkBuilder {
        EtherlinkBuilder::new(Network::Mainnet)
    }

    /// Create a builder for Etherlink testnet (chain id 128123).
    pub fn testnet() -> EtherlinkBuilder {
        EtherlinkBuilder::new(Network::Testnet)
    }

    /// Create a builder with a custom RPC URL.
    ///
    /// The network (and with it the chain id) defaults to testnet; use
    /// [`EtherlinkBuilder::network`] to point the URL at mainnet.
    pub fn custom(rpc_url: impl Into<String>) -> EtherlinkBuilder {
        EtherlinkBuilder::new(Network::Testnet).rpc_url(rpc_url)
    }

    /// Create a client from a deserialized [`Config`].
    pub fn from_config(config: Config) -> Result<Etherlink, ConfigError> {
        if config.rpc_url.is_empty() {
            return Err(ConfigError::MissingRpcUrl);
        }
        Etherlink::custom(config.rpc_url)
            .network(config.network.unwrap_or_default())
            .private_key(&config.private_key)?
            .build()
    }

    /// Create a configured client from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ETHERLINK_PRIVATE_KEY` (required): 0x-prefixed signing key.
    /// - `ETHERLINK_NETWORK` (optional): `"mainnet"` or `"testnet"`.
    ///   Defaults to `"testnet"` if not set.
    /// - `ETHERLINK_RPC_URL` (optional): overrides the network's default
    ///   RPC endpoint.
    ///
    /// # Example
    ///
    /// ```bash
    /// export ETHERLINK_NETWORK=testnet
    /// export ETHERLINK_PRIVATE_KEY=0x...
    /// ```
    ///
    /// ```rust,no_run
    /// # use etherlink_kit::Etherlink;
    /// # fn example() -> Result<(), etherlink_kit::Error> {
    /// let kit = Etherlink::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> Result<Etherlink, ConfigError> {
        let private_key = std::env::var("ETHERLINK_PRIVATE_KEY")
            .map_err(|_| ConfigError::MissingEnv("ETHERLINK_PRIVATE_KEY"))?;

        let network = match std::env::var("ETHERLINK_NETWORK") {
            Ok(name) => name.parse::<Network>()?,
            Err(_) => Network::default(),
        };

        let mut builder = EtherlinkBuilder::new(network);
        if let Ok(url) = std::env::var("ETHERLINK_RPC_URL") {
            builder = builder.rpc_url(url);
        }
        builder.private_key(&private_key)?.build()
    }

    /// The address of the bound signing identity.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The network this client is connected to.
    pub fn network(&self) -> Network {
        self.network
    }

    // ========================================================================
    // Sub-Clients
    // ========================================================================

    /// Native balance, message signing, and wallet generation.
    pub fn account(&self) -> Account {
        Account::new(self.transport.clone(), self.signer.clone())
    }

    /// Arbitrary contract reads and simulate-then-execute writes.
    pub fn chain(&self) -> Chain {
        Chain::new(self.transport.clone(), self.signer.address(), self.network)
    }

    /// ERC-20 operations.
    pub fn token(&self) -> Token {
        Token::new(self.chain())
    }

    /// ERC-721 operations, including collection deployment.
    pub fn nft(&self) -> Nft {
        Nft::new(self.chain())
    }
}

impl std::fmt::Debug for Etherlink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Etherlink")
            .field("transport", &self.transport)
            .field("address", &self.address())
            .field("network", &self.network)
            .finish()
    }
}

/// Builder for creating an [`Etherlink`] client.
///
/// # Example
///
/// ```rust,no_run
/// use etherlink_kit::Etherlink;
///
/// # fn example() -> Result<(), etherlink_kit::Error> {
/// let kit = Etherlink::testnet()
///     .private_key("0x...")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EtherlinkBuilder {
    rpc_url: Option<String>,
    network: Network,
    signer: Option<PrivateKeySigner>,
    transport: Option<Arc<dyn EvmTransport>>,
}

impl EtherlinkBuilder {
    fn new(network: Network) -> Self {
        Self {
            rpc_url: None,
            network,
            signer: None,
            transport: None,
        }
    }

    /// Select the network. Resets nothing else; a URL set via
    /// [`rpc_url`](Self::rpc_url) keeps precedence over the network default.
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Override the RPC endpoint.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Set the signing key from its 0x-prefixed hex encoding.
    ///
    /// Validation is eager: a missing `0x` prefix or malformed key fails
    /// here, before any connection is made.
    pub fn private_key(mut self, key: impl AsRef<str>) -> Result<Self, ConfigError> {
        let key = key.as_ref();
        if !key.starts_with("0x") {
            return Err(ConfigError::MissingPrivateKey);
        }
        let signer = key
            .parse::<PrivateKeySigner>()
            .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))?;
        self.signer = Some(signer);
        Ok(self)
    }

    /// Set the signing identity directly.
    pub fn signer(mut self, signer: PrivateKeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Use a custom transport instead of the HTTP default.
    ///
    /// The RPC URL is ignored when a transport is supplied.
    pub fn transport(mut self, transport: impl EvmTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the client.
    ///
    /// Fails if no signing key was configured or the RPC URL does not parse.
    pub fn build(self) -> Result<Etherlink, ConfigError> {
        let signer = self.signer.ok_or(ConfigError::MissingPrivateKey)?;

        let transport: Arc<dyn EvmTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let url = self
                    .rpc_url
                    .unwrap_or_else(|| self.network.default_rpc_url().to_string());
                if url.is_empty() {
                    return Err(ConfigError::MissingRpcUrl);
                }
                let wallet = EthereumWallet::from(signer.clone());
                Arc::new(HttpTransport::new(&url, wallet)?)
            }
        };

        Ok(Etherlink {
            transport,
            signer,
            network: self.network,
        })
    }
}

impl TryFrom<EtherlinkBuilder> for Etherlink {
    type Error = ConfigError;

    fn try_from(builder: EtherlinkBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    // Well-known anvil development key; never holds real funds.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    // ========================================================================
    // Builder tests
    // ========================================================================

    #[test]
    fn test_testnet_builder() {
        let kit = Etherlink::testnet()
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(kit.network(), Network::Testnet);
        assert_eq!(kit.address(), DEV_ADDRESS);
    }

    #[test]
    fn test_mainnet_builder() {
        let kit = Etherlink::mainnet()
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(kit.network(), Network::Mainnet);
        assert_eq!(kit.network().chain_id(), 42_793);
    }

    #[test]
    fn test_custom_builder_keeps_url_and_network_choice() {
        let kit = Etherlink::custom("https://custom-rpc.example.com")
            .network(Network::Mainnet)
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(kit.network(), Network::Mainnet);
        // The transport's Debug output carries the endpoint.
        assert!(format!("{kit:?}").contains("custom-rpc.example.com"));
    }

    #[test]
    fn test_build_without_key_fails() {
        let err = Etherlink::testnet().build().unwrap_err();

        assert_eq!(err, ConfigError::MissingPrivateKey);
        assert_eq!(
            err.to_string(),
            "A valid 0x-prefixed private key is required for initialization"
        );
    }

    #[test]
    fn test_unprefixed_key_rejected() {
        let err = Etherlink::testnet()
            .private_key("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
            .unwrap_err();

        assert_eq!(err, ConfigError::MissingPrivateKey);
    }

    #[test]
    fn test_malformed_key_rejected() {
        let err = Etherlink::testnet().private_key("0xnot-hex").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPrivateKey(_)));
    }

    #[test]
    fn test_signer_setter() {
        let signer: PrivateKeySigner = DEV_KEY.parse().unwrap();
        let kit = Etherlink::testnet().signer(signer).build().unwrap();

        assert_eq!(kit.address(), DEV_ADDRESS);
    }

    #[test]
    fn test_builder_try_from() {
        let builder = Etherlink::testnet().private_key(DEV_KEY).unwrap();
        let kit = Etherlink::try_from(builder).unwrap();

        assert_eq!(kit.address(), DEV_ADDRESS);
    }

    // ========================================================================
    // Facade tests
    // ========================================================================

    #[test]
    fn test_sub_clients_share_identity() {
        let kit = Etherlink::testnet()
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(kit.account().address(), kit.address());
        // Token and NFT clients build on the same core without panicking.
        let _ = kit.token();
        let _ = kit.nft();
        let _ = kit.chain();
    }

    #[test]
    fn test_clone_shares_transport() {
        let kit = Etherlink::testnet()
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();
        let cloned = kit.clone();

        assert_eq!(kit.address(), cloned.address());
        assert_eq!(kit.network(), cloned.network());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let kit = Etherlink::testnet()
            .private_key(DEV_KEY)
            .unwrap()
            .build()
            .unwrap();
        let debug = format!("{kit:?}");

        assert!(debug.contains("Etherlink"));
        assert!(debug.contains("0xf39F"), "address should be visible");
        assert!(
            !debug.to_lowercase().contains("ac0974bec"),
            "private key material must never appear in Debug output: {debug}"
        );
    }

    // ========================================================================
    // Config tests
    // ========================================================================

    #[test]
    fn test_config_deserializes_camel_case() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "rpcUrl": "https://node.ghostnet.etherlink.com",
            "privateKey": DEV_KEY,
            "network": "mainnet"
        }))
        .unwrap();

        assert_eq!(config.rpc_url, "https://node.ghostnet.etherlink.com");
        assert_eq!(config.network, Some(Network::Mainnet));
    }

    #[test]
    fn test_from_config_defaults_to_testnet() {
        let kit = Etherlink::from_config(Config {
            rpc_url: "https://node.ghostnet.etherlink.com".to_string(),
            private_key: DEV_KEY.to_string(),
            network: None,
        })
        .unwrap();

        assert_eq!(kit.network(), Network::Testnet);
        assert_eq!(kit.address(), DEV_ADDRESS);
    }

    #[test]
    fn test_from_config_requires_rpc_url() {
        let err = Etherlink::from_config(Config {
            rpc_url: String::new(),
            private_key: DEV_KEY.to_string(),
            network: None,
        })
        .unwrap_err();

        assert_eq!(err, ConfigError::MissingRpcUrl);
        assert_eq!(err.to_string(), "RPC URL is required for initialization");
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = Config {
            rpc_url: "https://node.ghostnet.etherlink.com".to_string(),
            private_key: DEV_KEY.to_string(),
            network: None,
        };
        let debug = format!("{config:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("ac0974bec"));
    }

    // ========================================================================
    // from_env tests
    // ========================================================================

    // NOTE: Environment variable tests are consolidated into a single test
    // because they modify global state and would race with each other if
    // run in parallel. Each scenario is tested sequentially within this test.
    #[test]
    fn test_from_env_scenarios() {
        // Helper to clean up env vars
        fn clear_env() {
            // SAFETY: This is a test and we control the execution
            unsafe {
                std::env::remove_var("ETHERLINK_NETWORK");
                std::env::remove_var("ETHERLINK_RPC_URL");
                std::env::remove_var("ETHERLINK_PRIVATE_KEY");
            }
        }

        // Scenario 1: No vars - the private key is required
        clear_env();
        {
            let err = Etherlink::from_env().unwrap_err();
            assert_eq!(err, ConfigError::MissingEnv("ETHERLINK_PRIVATE_KEY"));
            assert!(
                err.to_string().contains("ETHERLINK_PRIVATE_KEY"),
                "Error should mention the missing variable: {err}"
            );
        }

        // Scenario 2: Key only - defaults to testnet
        clear_env();
        unsafe {
            std::env::set_var("ETHERLINK_PRIVATE_KEY", DEV_KEY);
        }
        {
            let kit = Etherlink::from_env().unwrap();
            assert_eq!(kit.network(), Network::Testnet);
            assert_eq!(kit.address(), DEV_ADDRESS);
        }

        // Scenario 3: Explicit mainnet
        clear_env();
        unsafe {
            std::env::set_var("ETHERLINK_PRIVATE_KEY", DEV_KEY);
            std::env::set_var("ETHERLINK_NETWORK", "mainnet");
        }
        {
            let kit = Etherlink::from_env().unwrap();
            assert_eq!(kit.network(), Network::Mainnet);
        }

        // Scenario 4: Unknown network name - should error
        clear_env();
        unsafe {
            std::env::set_var("ETHERLINK_PRIVATE_KEY", DEV_KEY);
            std::env::set_var("ETHERLINK_NETWORK", "goerli");
        }
        {
            let err = Etherlink::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::UnknownNetwork(_)));
            assert!(err.to_string().contains("goerli"));
        }

        // Scenario 5: Custom RPC URL override
        clear_env();
        unsafe {
            std::env::set_var("ETHERLINK_PRIVATE_KEY", DEV_KEY);
            std::env::set_var("ETHERLINK_RPC_URL", "https://custom-rpc.example.com");
        }
        {
            let kit = Etherlink::from_env().unwrap();
            assert!(format!("{kit:?}").contains("custom-rpc.example.com"));
        }

        // Final cleanup
        clear_env();
    }
}
