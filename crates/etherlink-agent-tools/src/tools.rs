//! The four Etherlink tools and their argument handling.
//!
//! Tool names and descriptions are part of the external contract — agents
//! and their prompts are written against them — and must stay stable.

use std::sync::Arc;

use alloy::primitives::B256;
use rig::completion::ToolDefinition;
use rig::tool::{Tool, ToolError};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use etherlink_kit::{Etherlink, ExecuteParams, MintNftParams, TransferParams};

// =============================================================================
// EtherlinkTools
// =============================================================================

/// The full tool suite over one shared [`Etherlink`] client.
///
/// All four tools close over the same kit instance and therefore act as the
/// same on-chain identity.
#[derive(Clone)]
pub struct EtherlinkTools {
    kit: Arc<Etherlink>,
}

impl EtherlinkTools {
    pub fn new(kit: impl Into<Arc<Etherlink>>) -> Self {
        Self { kit: kit.into() }
    }

    /// `createEtherlinkAccount` — generate a fresh wallet.
    pub fn create_account(&self) -> CreateEtherlinkAccount {
        CreateEtherlinkAccount {
            kit: self.kit.clone(),
        }
    }

    /// `transferFungibleToken` — move ERC-20 units.
    pub fn transfer_fungible_token(&self) -> TransferFungibleToken {
        TransferFungibleToken {
            kit: self.kit.clone(),
        }
    }

    /// `mintNFT` — mint into an existing collection.
    pub fn mint_nft(&self) -> MintNft {
        MintNft {
            kit: self.kit.clone(),
        }
    }

    /// `executeSmartContract` — call any state-changing function by ABI.
    pub fn execute_smart_contract(&self) -> ExecuteSmartContract {
        ExecuteSmartContract {
            kit: self.kit.clone(),
        }
    }
}

// =============================================================================
// Argument handling
// =============================================================================

/// Decode tool arguments that may arrive as a JSON object or as a
/// JSON-encoded string containing one.
fn parse_args<T: DeserializeOwned>(raw: serde_json::Value) -> Result<T, String> {
    let value = unwrap_json_string(raw)?;
    serde_json::from_value(value).map_err(|e| format!("invalid arguments: {e}"))
}

fn unwrap_json_string(raw: serde_json::Value) -> Result<serde_json::Value, String> {
    match raw {
        serde_json::Value::String(text) => {
            serde_json::from_str(&text).map_err(|e| format!("arguments are not valid JSON: {e}"))
        }
        other => Ok(other),
    }
}

// =============================================================================
// createEtherlinkAccount
// =============================================================================

/// Generates a fresh, empty wallet and hands the agent its credentials.
#[derive(Clone)]
pub struct CreateEtherlinkAccount {
    kit: Arc<Etherlink>,
}

impl CreateEtherlinkAccount {
    pub fn new(kit: impl Into<Arc<Etherlink>>) -> Self {
        Self { kit: kit.into() }
    }
}

impl Tool for CreateEtherlinkAccount {
    const NAME: &'static str = "createEtherlinkAccount";
    type Args = serde_json::Value;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Generates a new, empty Etherlink wallet. Returns the new wallet's \
                          address and private key. Use this when a user needs a fresh wallet \
                          to start with."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let account = self.kit.account().create();
        debug!(address = %account.address, "tool generated a fresh wallet");
        Ok(format!(
            "New account created. Address: {}, Private Key: {}. \
             IMPORTANT: Store this private key securely and do not share it.",
            account.address,
            account.private_key_hex()
        ))
    }
}

// =============================================================================
// transferFungibleToken
// =============================================================================

/// Transfers ERC-20 units from the agent's wallet.
#[derive(Clone)]
pub struct TransferFungibleToken {
    kit: Arc<Etherlink>,
}

impl TransferFungibleToken {
    pub fn new(kit: impl Into<Arc<Etherlink>>) -> Self {
        Self { kit: kit.into() }
    }

    async fn transfer(&self, raw: serde_json::Value) -> Result<B256, String> {
        let params: TransferParams = parse_args(raw)?;
        self.kit
            .token()
            .transfer(&params)
            .await
            .map_err(|e| e.to_string())
    }
}

impl Tool for TransferFungibleToken {
    const NAME: &'static str = "transferFungibleToken";
    type Args = serde_json::Value;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Transfers a specific amount of a fungible token (like an ERC-20) \
                          from the agent's wallet to another address on the Etherlink testnet. \
                          Requires the token's contract address, the recipient's address, and \
                          the amount to send in its smallest unit (e.g., \
                          '1000000000000000000' for 1 token with 18 decimals)."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "tokenAddress": {
                        "type": "string",
                        "description": "The ERC-20 token's contract address (0x-prefixed)"
                    },
                    "to": {
                        "type": "string",
                        "description": "The recipient's address (0x-prefixed)"
                    },
                    "amount": {
                        "type": "string",
                        "description": "The amount in the token's smallest unit, as a decimal string"
                    }
                },
                "required": ["tokenAddress", "to", "amount"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(match self.transfer(args).await {
            Ok(tx_hash) => {
                format!("Successfully initiated transfer. Transaction hash: {tx_hash}")
            }
            Err(detail) => format!("Error during transfer: {detail}"),
        })
    }
}

// =============================================================================
// mintNFT
// =============================================================================

/// Mints a token into an existing ERC-721 collection.
#[derive(Clone)]
pub struct MintNft {
    kit: Arc<Etherlink>,
}

impl MintNft {
    pub fn new(kit: impl Into<Arc<Etherlink>>) -> Self {
        Self { kit: kit.into() }
    }

    async fn mint(&self, raw: serde_json::Value) -> Result<B256, String> {
        let params: MintNftParams = parse_args(raw)?;
        self.kit.nft().mint(&params).await.map_err(|e| e.to_string())
    }
}

impl Tool for MintNft {
    const NAME: &'static str = "mintNFT";
    type Args = serde_json::Value;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Mints a new, unique Non-Fungible Token (NFT) within a given \
                          collection on the Etherlink testnet. Requires the collection's \
                          contract address, the recipient's address, and a URL pointing to \
                          the NFT's JSON metadata."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "collectionAddress": {
                        "type": "string",
                        "description": "The NFT collection's contract address (0x-prefixed)"
                    },
                    "to": {
                        "type": "string",
                        "description": "The recipient's address (0x-prefixed)"
                    },
                    "metadataUri": {
                        "type": "string",
                        "description": "URL of the JSON document describing the token"
                    }
                },
                "required": ["collectionAddress", "to", "metadataUri"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(match self.mint(args).await {
            Ok(tx_hash) => {
                format!("Successfully initiated NFT mint. Transaction hash: {tx_hash}")
            }
            Err(detail) => format!("Error minting NFT: {detail}"),
        })
    }
}

// =============================================================================
// executeSmartContract
// =============================================================================

/// Executes any state-changing contract function by address and ABI.
#[derive(Clone)]
pub struct ExecuteSmartContract {
    kit: Arc<Etherlink>,
}

impl ExecuteSmartContract {
    pub fn new(kit: impl Into<Arc<Etherlink>>) -> Self {
        Self { kit: kit.into() }
    }

    async fn execute(&self, raw: serde_json::Value) -> Result<B256, String> {
        let mut value = unwrap_json_string(raw)?;
        // Models sometimes double-encode the ABI as a JSON string.
        if let Some(abi) = value.get_mut("abi") {
            if let serde_json::Value::String(text) = abi {
                *abi = serde_json::from_str(text)
                    .map_err(|e| format!("ABI is not valid JSON: {e}"))?;
            }
        }
        let params: ExecuteParams =
            serde_json::from_value(value).map_err(|e| format!("invalid arguments: {e}"))?;

        self.kit
            .chain()
            .execute(&params)
            .await
            .map_err(|e| e.to_string())
    }
}

impl Tool for ExecuteSmartContract {
    const NAME: &'static str = "executeSmartContract";
    type Args = serde_json::Value;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Executes a write function on any smart contract on the Etherlink \
                          testnet that requires a transaction. Use this for any action that \
                          changes blockchain state, like voting, staking, or claiming \
                          rewards. Requires the contract's address, its JSON ABI, the \
                          function name, and any arguments."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "The contract's address (0x-prefixed)"
                    },
                    "abi": {
                        "type": "array",
                        "description": "The contract's JSON ABI, or the fragment covering the target function"
                    },
                    "functionName": {
                        "type": "string",
                        "description": "The name of the function to execute"
                    },
                    "args": {
                        "type": "array",
                        "description": "Ordered function arguments; addresses and large numbers as strings",
                        "items": {}
                    }
                },
                "required": ["address", "abi", "functionName"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(match self.execute(args).await {
            Ok(tx_hash) => {
                format!("Successfully executed contract function. Transaction hash: {tx_hash}")
            }
            Err(detail) => format!("Error executing contract: {detail}"),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use alloy::primitives::{Address, Bytes, U256};
    use alloy::rpc::types::TransactionRequest;
    use etherlink_kit::{EvmTransport, Receipt, TransportError, TransportFuture};

    use super::*;

    // Well-known anvil development key; never holds real funds.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TOKEN: &str = "0x0000000000000000000000000000000000000042";
    const RECIPIENT: &str = "0x0000000000000000000000000000000000000043";

    #[derive(Debug, Default)]
    struct StubState {
        call_failure: Option<TransportError>,
        sends: Mutex<Vec<TransactionRequest>>,
    }

    /// Answers every dry run and submission from a fixed script.
    #[derive(Debug, Clone, Default)]
    struct StubTransport(Arc<StubState>);

    impl StubTransport {
        fn failing_calls(failure: TransportError) -> Self {
            Self(Arc::new(StubState {
                call_failure: Some(failure),
                sends: Mutex::new(Vec::new()),
            }))
        }

        fn sends(&self) -> Vec<TransactionRequest> {
            self.0.sends.lock().unwrap().clone()
        }
    }

    impl EvmTransport for StubTransport {
        fn balance(&self, _address: Address) -> TransportFuture<'_, U256> {
            Box::pin(async { Ok(U256::ZERO) })
        }

        fn call(&self, _request: TransactionRequest) -> TransportFuture<'_, Bytes> {
            let response = match &self.0.call_failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(Bytes::new()),
            };
            Box::pin(async move { response })
        }

        fn send(&self, request: TransactionRequest) -> TransportFuture<'_, B256> {
            self.0.sends.lock().unwrap().push(request);
            Box::pin(async { Ok(B256::repeat_byte(0xab)) })
        }

        fn wait_for_receipt(&self, tx_hash: B256) -> TransportFuture<'_, Receipt> {
            Box::pin(async move {
                Ok(Receipt {
                    transaction_hash: tx_hash,
                    block_number: Some(1),
                    gas_used: 21_000,
                    success: true,
                    contract_address: None,
                })
            })
        }
    }

    fn tools_with(transport: StubTransport) -> EtherlinkTools {
        let kit = Etherlink::testnet()
            .private_key(DEV_KEY)
            .unwrap()
            .transport(transport)
            .build()
            .unwrap();
        EtherlinkTools::new(kit)
    }

    fn transfer_args() -> serde_json::Value {
        json!({
            "tokenAddress": TOKEN,
            "to": RECIPIENT,
            "amount": "1000000000000000000"
        })
    }

    // ========================================================================
    // Contract stability
    // ========================================================================

    #[test]
    fn test_tool_names_are_stable() {
        assert_eq!(CreateEtherlinkAccount::NAME, "createEtherlinkAccount");
        assert_eq!(TransferFungibleToken::NAME, "transferFungibleToken");
        assert_eq!(MintNft::NAME, "mintNFT");
        assert_eq!(ExecuteSmartContract::NAME, "executeSmartContract");
    }

    #[tokio::test]
    async fn test_definitions_describe_every_tool() {
        let tools = tools_with(StubTransport::default());

        let create = tools.create_account().definition(String::new()).await;
        assert_eq!(create.name, "createEtherlinkAccount");
        assert!(
            create
                .description
                .contains("Generates a new, empty Etherlink wallet")
        );

        let transfer = tools
            .transfer_fungible_token()
            .definition(String::new())
            .await;
        assert_eq!(transfer.name, "transferFungibleToken");
        assert!(
            transfer
                .description
                .contains("Transfers a specific amount of a fungible token")
        );
        assert_eq!(transfer.parameters["required"], json!(["tokenAddress", "to", "amount"]));

        let mint = tools.mint_nft().definition(String::new()).await;
        assert_eq!(mint.name, "mintNFT");
        assert!(
            mint.description
                .contains("Mints a new, unique Non-Fungible Token")
        );

        let execute = tools.execute_smart_contract().definition(String::new()).await;
        assert_eq!(execute.name, "executeSmartContract");
        assert!(
            execute
                .description
                .contains("Executes a write function on any smart contract")
        );
    }

    // ========================================================================
    // createEtherlinkAccount
    // ========================================================================

    #[tokio::test]
    async fn test_create_account_reports_credentials_with_warning() {
        let tools = tools_with(StubTransport::default());

        let message = tools.create_account().call(json!({})).await.unwrap();

        assert!(message.starts_with("New account created. Address: 0x"));
        assert!(message.contains(", Private Key: 0x"));
        assert!(
            message.ends_with("IMPORTANT: Store this private key securely and do not share it.")
        );
    }

    #[tokio::test]
    async fn test_create_account_yields_distinct_wallets() {
        let tools = tools_with(StubTransport::default());
        let tool = tools.create_account();

        let first = tool.call(json!({})).await.unwrap();
        let second = tool.call(json!({})).await.unwrap();

        assert_ne!(first, second);
    }

    // ========================================================================
    // transferFungibleToken
    // ========================================================================

    #[tokio::test]
    async fn test_transfer_success_message_carries_tx_hash() {
        let transport = StubTransport::default();
        let tools = tools_with(transport.clone());

        let message = tools
            .transfer_fungible_token()
            .call(transfer_args())
            .await
            .unwrap();

        assert!(message.starts_with("Successfully initiated transfer. Transaction hash: 0x"));
        assert!(message.contains(&B256::repeat_byte(0xab).to_string()));
        assert_eq!(transport.sends().len(), 1);
    }

    #[tokio::test]
    async fn test_transfer_accepts_stringified_json() {
        let tools = tools_with(StubTransport::default());
        let stringified = serde_json::Value::String(transfer_args().to_string());

        let message = tools
            .transfer_fungible_token()
            .call(stringified)
            .await
            .unwrap();

        assert!(message.starts_with("Successfully initiated transfer."));
    }

    #[tokio::test]
    async fn test_transfer_unparsable_input_resolves_to_error_text() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .transfer_fungible_token()
            .call(serde_json::Value::String("send one token to bob".to_string()))
            .await
            .unwrap();

        assert!(message.starts_with("Error during transfer:"));
    }

    #[tokio::test]
    async fn test_transfer_revert_becomes_error_text_and_submits_nothing() {
        let transport = StubTransport::failing_calls(TransportError::rpc(
            3,
            "execution reverted: ERC20: transfer amount exceeds balance",
        ));
        let tools = tools_with(transport.clone());

        let message = tools
            .transfer_fungible_token()
            .call(transfer_args())
            .await
            .unwrap();

        assert!(message.starts_with("Error during transfer:"));
        assert!(message.contains("exceeds balance"));
        assert!(transport.sends().is_empty());
    }

    // ========================================================================
    // mintNFT
    // ========================================================================

    #[tokio::test]
    async fn test_mint_success_and_error_messages() {
        let tools = tools_with(StubTransport::default());
        let args = json!({
            "collectionAddress": TOKEN,
            "to": RECIPIENT,
            "metadataUri": "https://example.com/1.json"
        });

        let message = tools.mint_nft().call(args).await.unwrap();
        assert!(message.starts_with("Successfully initiated NFT mint. Transaction hash: 0x"));

        let failing = tools_with(StubTransport::failing_calls(TransportError::rpc(
            3,
            "execution reverted: not the collection owner",
        )));
        let message = failing
            .mint_nft()
            .call(json!({
                "collectionAddress": TOKEN,
                "to": RECIPIENT,
                "metadataUri": "https://example.com/1.json"
            }))
            .await
            .unwrap();
        assert!(message.starts_with("Error minting NFT:"));
    }

    #[tokio::test]
    async fn test_mint_with_missing_fields_resolves_to_error_text() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .mint_nft()
            .call(json!({ "collectionAddress": TOKEN }))
            .await
            .unwrap();

        assert!(message.starts_with("Error minting NFT:"));
    }

    // ========================================================================
    // executeSmartContract
    // ========================================================================

    fn vote_abi_json() -> serde_json::Value {
        json!([{
            "type": "function",
            "name": "vote",
            "inputs": [{ "name": "proposal", "type": "uint256" }],
            "outputs": [],
            "stateMutability": "nonpayable"
        }])
    }

    #[tokio::test]
    async fn test_execute_success_message_carries_tx_hash() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .execute_smart_contract()
            .call(json!({
                "address": TOKEN,
                "abi": vote_abi_json(),
                "functionName": "vote",
                "args": ["1"]
            }))
            .await
            .unwrap();

        assert!(
            message.starts_with("Successfully executed contract function. Transaction hash: 0x")
        );
    }

    #[tokio::test]
    async fn test_execute_accepts_stringified_abi() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .execute_smart_contract()
            .call(json!({
                "address": TOKEN,
                "abi": vote_abi_json().to_string(),
                "functionName": "vote",
                "args": ["1"]
            }))
            .await
            .unwrap();

        assert!(message.starts_with("Successfully executed contract function."));
    }

    #[tokio::test]
    async fn test_execute_with_malformed_args_resolves_to_error_text() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .execute_smart_contract()
            .call(json!({ "address": TOKEN, "abi": vote_abi_json() }))
            .await
            .unwrap();

        assert!(message.starts_with("Error executing contract:"));
    }

    #[tokio::test]
    async fn test_execute_unknown_function_resolves_to_error_text() {
        let tools = tools_with(StubTransport::default());

        let message = tools
            .execute_smart_contract()
            .call(json!({
                "address": TOKEN,
                "abi": vote_abi_json(),
                "functionName": "veto",
                "args": []
            }))
            .await
            .unwrap();

        assert!(message.starts_with("Error executing contract:"));
        assert!(message.contains("veto"));
    }
}
