//! Non-fungible token client (ERC-721).

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256};
use alloy::sol;
use alloy::sol_types::SolCall;
use tracing::{debug, info};

use crate::contract::Chain;
use crate::error::{CallError, ConfigError, Error};
use crate::types::{
    BurnNftParams, CreateCollectionParams, Deployment, MintNftParams, OwnerParams,
    TransferNftParams,
};

sol! {
    /// ERC-721 surface of an OpenZeppelin-style collection with URI storage.
    interface IErc721 {
        function safeMint(address to, string uri) external;
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function burn(uint256 tokenId) external;
        function ownerOf(uint256 tokenId) external view returns (address);
    }
}

/// Creation code for the collection contract deployed by
/// [`Nft::create_collection`].
///
/// Compile an ERC-721 artifact with a `constructor(string name, string
/// symbol)` (OpenZeppelin `ERC721URIStorage` plus `safeMint` works as-is),
/// embed its creation code with [`alloy::primitives::hex!`], and wrap it in
/// `Some`. While this is `None`, `create_collection` fails with
/// [`ConfigError::MissingCollectionBytecode`] before touching the network.
const COLLECTION_BYTECODE: Option<&[u8]> = None;

// =============================================================================
// Nft
// =============================================================================

/// Client for ERC-721 collections.
///
/// Create via [`Etherlink::nft()`](crate::Etherlink::nft). Mints, transfers,
/// and burns follow the simulate-then-execute protocol; collection deployment
/// is the one exception — contract creation is evaluated by the node on
/// submission and the receipt carries the verdict.
///
/// # Example
///
/// ```rust,no_run
/// use alloy::primitives::address;
/// use etherlink_kit::{Etherlink, MintNftParams};
///
/// # async fn example() -> Result<(), etherlink_kit::Error> {
/// let kit = Etherlink::testnet().private_key("0x...")?.build()?;
///
/// let tx_hash = kit
///     .nft()
///     .mint(&MintNftParams {
///         collection_address: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
///         to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
///         metadata_uri: "https://example.com/metadata/1.json".to_string(),
///     })
///     .await?;
/// println!("mint submitted: {tx_hash}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Nft {
    chain: Chain,
}

impl Nft {
    pub(crate) fn new(chain: Chain) -> Self {
        Self { chain }
    }

    /// Deploy a fresh ERC-721 collection and wait for its address.
    ///
    /// Constructor arguments (`name`, `symbol`) are ABI-encoded and appended
    /// to the embedded creation code. Requires `COLLECTION_BYTECODE` to be
    /// configured.
    pub async fn create_collection(
        &self,
        params: &CreateCollectionParams,
    ) -> Result<Deployment, Error> {
        let code = COLLECTION_BYTECODE.ok_or(ConfigError::MissingCollectionBytecode)?;

        let constructor_args = DynSolValue::Tuple(vec![
            DynSolValue::String(params.name.clone()),
            DynSolValue::String(params.symbol.clone()),
        ])
        .abi_encode_params();

        let mut creation = code.to_vec();
        creation.extend_from_slice(&constructor_args);

        debug!(name = %params.name, symbol = %params.symbol, "deploying NFT collection");
        let deployment = self.chain.deploy(creation).await?;
        info!(address = %deployment.address, "NFT collection deployed");
        Ok(deployment)
    }

    /// Mint a new token into a collection.
    ///
    /// `metadata_uri` should point at a JSON document describing the token.
    pub async fn mint(&self, params: &MintNftParams) -> Result<B256, Error> {
        debug!(
            collection = %params.collection_address,
            to = %params.to,
            uri = %params.metadata_uri,
            "minting NFT"
        );
        let call = IErc721::safeMintCall {
            to: params.to,
            uri: params.metadata_uri.clone(),
        };
        self.write(params.collection_address, call.abi_encode())
            .await
    }

    /// Transfer a token from the bound account to a recipient.
    ///
    /// The `from` side of `safeTransferFrom` is always the bound account; the
    /// dry run reverts if it does not own (or is not approved for) the token.
    pub async fn transfer(&self, params: &TransferNftParams) -> Result<B256, Error> {
        debug!(
            collection = %params.collection_address,
            to = %params.to,
            token_id = %params.token_id,
            "transferring NFT"
        );
        let call = IErc721::safeTransferFromCall {
            from: self.chain.signer_address(),
            to: params.to,
            tokenId: params.token_id,
        };
        self.write(params.collection_address, call.abi_encode())
            .await
    }

    /// Burn a token.
    pub async fn burn(&self, params: &BurnNftParams) -> Result<B256, Error> {
        debug!(
            collection = %params.collection_address,
            token_id = %params.token_id,
            "burning NFT"
        );
        let call = IErc721::burnCall {
            tokenId: params.token_id,
        };
        self.write(params.collection_address, call.abi_encode())
            .await
    }

    /// Get the current owner of a token.
    pub async fn owner_of(&self, params: &OwnerParams) -> Result<Address, Error> {
        let call = IErc721::ownerOfCall {
            tokenId: params.token_id,
        };

        let data = self
            .chain
            .read_raw(params.collection_address, call.abi_encode())
            .await?;
        let owner = <IErc721::ownerOfCall as SolCall>::abi_decode_returns(&data)
            .map_err(|e| CallError::Decode(e.to_string()))?;
        Ok(owner)
    }

    async fn write(&self, to: Address, data: Vec<u8>) -> Result<B256, Error> {
        let simulation = self.chain.simulate_raw(to, data, None).await?;
        self.chain.submit(simulation).await
    }
}

// =============================================================================
// Tests
// =============================================================================
