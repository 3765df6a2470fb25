//! Local-key wallet standing in for a browser-injected one.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::blockchain::capability::WalletCapability;
use crate::blockchain::chain::ChainDescriptor;
use crate::blockchain::contract::PreparedCall;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "TIPJAR_PRIVATE_KEY";

type SigningProvider = Arc<dyn Provider + Send + Sync>;

/// Wallet that signs with a local key and broadcasts through the node of
/// whichever chain descriptor it is handed.
pub struct LocalWallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain the key signs for (EIP-155).
    chain_id: u64,
    /// Node the wallet reports its chain from.
    home_url: url::Url,
    /// Signing providers keyed by RPC URL, built on first use.
    providers: Mutex<HashMap<url::Url, SigningProvider>>,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    /// * `rpc_url` - Node the wallet broadcasts through
    pub fn from_private_key(
        private_key_hex: &str,
        chain_id: u64,
        rpc_url: url::Url,
    ) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            rpc_url = %rpc_url,
            "Wallet initialized"
        );

        Ok(Self {
            signer,
            chain_id,
            home_url: rpc_url,
            providers: Mutex::new(HashMap::new()),
        })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `TIPJAR_PRIVATE_KEY` from environment.
    pub fn from_env(chain_id: u64, rpc_url: url::Url) -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id, rpc_url)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet signs for.
    pub fn signing_chain_id(&self) -> u64 {
        self.chain_id
    }

    /// RPC URLs the wallet has built signing providers for.
    pub fn broadcast_endpoints(&self) -> Vec<url::Url> {
        let providers = self.providers.lock().unwrap_or_else(|e| e.into_inner());
        providers.keys().cloned().collect()
    }

    /// Signing provider for `rpc_url`, reused across calls.
    fn provider_for(&self, rpc_url: &url::Url) -> SigningProvider {
        let mut providers = self.providers.lock().unwrap_or_else(|e| e.into_inner());
        providers
            .entry(rpc_url.clone())
            .or_insert_with(|| {
                tracing::debug!(rpc_url = %rpc_url, "Creating signing provider");
                Arc::new(
                    ProviderBuilder::new()
                        .wallet(EthereumWallet::from(self.signer.clone()))
                        .connect_http(rpc_url.clone()),
                ) as SigningProvider
            })
            .clone()
    }
}

#[async_trait]
impl WalletCapability for LocalWallet {
    async fn request_accounts(&self) -> BlockchainResult<Vec<Address>> {
        Ok(vec![self.address()])
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.provider_for(&self.home_url)
            .get_chain_id()
            .await
            .map(ChainId)
            .map_err(BlockchainError::from_transport)
    }

    async fn send_transaction(
        &self,
        call: PreparedCall,
        chain: &ChainDescriptor,
    ) -> BlockchainResult<TxHash> {
        if chain.id.0 != self.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.chain_id,
                actual: chain.id.0,
            });
        }
        if call.call.from != self.address() {
            return Err(BlockchainError::Wallet(format!(
                "Account {} is not managed by this wallet",
                call.call.from
            )));
        }

        let request = call.request.with_chain_id(chain.id.0);
        let pending = self
            .provider_for(&chain.rpc_url)
            .send_transaction(request)
            .await
            .map_err(BlockchainError::from_transport)?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            method = call.call.method.name(),
            chain = %chain.name,
            rpc_url = %chain.rpc_url,
            "Transaction submitted"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .field("home_url", &self.home_url.as_str())
            .finish()
    }
}
