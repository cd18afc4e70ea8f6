//! Wires the full Etherlink toolset into a rig agent.
//!
//! Run: cargo run --example agent
//!
//! Set environment variables:
//!   ETHERLINK_PRIVATE_KEY=0x...   (the agent's on-chain identity)
//!   OPENAI_API_KEY=sk-...

use etherlink_agent_tools::EtherlinkTools;
use etherlink_kit::Etherlink;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tools = EtherlinkTools::new(Etherlink::from_env()?);

    let agent = rig::providers::openai::Client::from_env()
        .agent("gpt-4o")
        .preamble(
            "You are an assistant that manages Etherlink wallets. \
             Use the provided tools for any on-chain action, and relay \
             their responses back to the user verbatim.",
        )
        .tool(tools.create_account())
        .tool(tools.transfer_fungible_token())
        .tool(tools.mint_nft())
        .tool(tools.execute_smart_contract())
        .build();

    let answer = agent.prompt("Create a new wallet for me.").await?;
    println!("{answer}");

    Ok(())
}
