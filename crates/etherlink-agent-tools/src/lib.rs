//! rig tools that let LLM agents act on Etherlink.
//!
//! **etherlink-agent-tools** wraps an [`Etherlink`](etherlink_kit::Etherlink)
//! client in a fixed set of [rig](https://docs.rs/rig-core) tools so an agent
//! can create wallets, move tokens, mint NFTs, and call arbitrary contracts.
//!
//! The tools speak text in both directions: arguments arrive as JSON (either
//! an object or a JSON-encoded string of one — models produce both) and every
//! outcome, including a failure, comes back as a human-readable string. A
//! tool call never resolves to an error; the agent always gets something it
//! can read and relay. Inside the kit the usual typed errors and the
//! simulate-then-execute protocol still apply, so a reverting transfer is
//! caught during the dry run and reported as text without anything reaching
//! the chain.
//!
//! # Example
//!
//! ```rust,no_run
//! use etherlink_agent_tools::EtherlinkTools;
//! use etherlink_kit::Etherlink;
//! use rig::client::{CompletionClient, ProviderClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let kit = Etherlink::testnet().private_key("0x...")?.build()?;
//! let tools = EtherlinkTools::new(kit);
//!
//! let agent = rig::providers::openai::Client::from_env()
//!     .agent("gpt-4o")
//!     .preamble("You are a helpful assistant operating a wallet on Etherlink testnet.")
//!     .tool(tools.create_account())
//!     .tool(tools.transfer_fungible_token())
//!     .tool(tools.mint_nft())
//!     .tool(tools.execute_smart_contract())
//!     .build();
//! # let _ = agent;
//! # Ok(())
//! # }
//! ```

mod tools;

pub use tools::{
    CreateEtherlinkAccount, EtherlinkTools, ExecuteSmartContract, MintNft, TransferFungibleToken,
};
