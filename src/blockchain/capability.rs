//! Capabilities the orchestrator borrows from its environment.
//!
//! A browser wallet exposes account access, chain lookup and signing; the node
//! behind it answers balance queries and simulates contract calls. Both are
//! traits so the orchestrator can run against alloy-backed implementations or
//! scripted test doubles.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::blockchain::chain::ChainDescriptor;
use crate::blockchain::contract::{ContractCall, PreparedCall};
use crate::blockchain::types::{BlockchainResult, ChainId};

/// Account access and transaction signing.
#[async_trait]
pub trait WalletCapability: Send + Sync {
    /// Ask the holder for account access. The first entry is the active account.
    async fn request_accounts(&self) -> BlockchainResult<Vec<Address>>;

    /// Chain the wallet is currently connected to.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Sign and broadcast a simulated call on the described chain.
    async fn send_transaction(
        &self,
        call: PreparedCall,
        chain: &ChainDescriptor,
    ) -> BlockchainResult<TxHash>;
}

/// Read access to chain state.
#[async_trait]
pub trait RpcCapability: Send + Sync {
    /// Native balance in wei.
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Dry-run a contract call and return it ready for submission.
    async fn simulate(&self, call: ContractCall) -> BlockchainResult<PreparedCall>;
}

/// The injected provider: a wallet and the node it talks to.
#[derive(Clone)]
pub struct InjectedProvider {
    pub wallet: Arc<dyn WalletCapability>,
    pub rpc: Arc<dyn RpcCapability>,
}

impl InjectedProvider {
    pub fn new(wallet: Arc<dyn WalletCapability>, rpc: Arc<dyn RpcCapability>) -> Self {
        Self { wallet, rpc }
    }
}

impl std::fmt::Debug for InjectedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedProvider").finish_non_exhaustive()
    }
}
