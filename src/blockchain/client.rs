//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint (primary + failovers)
//! - Query chain state (chain ID, balances)
//! - Simulate contract calls before they are signed
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::capability::RpcCapability;
use crate::blockchain::contract::{ContractCall, PreparedCall};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::schema::RpcConfig;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: RpcConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; unreachable endpoints surface on first use.
    pub fn new(config: RpcConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url)) as Arc<dyn Provider + Send + Sync>);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::info!(
            rpc_url = %config.url,
            providers = providers.len(),
            timeout_secs = config.timeout_secs,
            "Blockchain client initialized"
        );

        Ok(Self {
            providers,
            config,
            timeout_duration,
        })
    }

    /// Verify the node serves the expected chain.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(BlockchainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        let mut timed_out = false;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_balance(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    timed_out = false;
                    tracing::warn!(provider_idx = i, error = %e, "RPC error");
                }
                Err(_) => {
                    timed_out = true;
                    tracing::warn!(provider_idx = i, "RPC timeout");
                }
            }
        }
        if timed_out {
            return Err(BlockchainError::Timeout(self.config.timeout_secs));
        }
        Err(BlockchainError::Rpc("All providers failed to get balance".to_string()))
    }

    /// Dry-run a contract call (`eth_call`) and estimate its gas.
    ///
    /// A node that answers with an error response has ruled on the call, so
    /// that error is returned as-is instead of asking the next provider.
    pub async fn simulate_call(&self, call: &ContractCall) -> BlockchainResult<PreparedCall> {
        let request = call.to_request();
        let mut timed_out = false;

        for (i, provider) in self.providers.iter().enumerate() {
            let simulation = async {
                provider.call(request.clone()).await?;
                provider.estimate_gas(request.clone()).await
            };
            match timeout(self.timeout_duration, simulation).await {
                Ok(Ok(gas_limit)) => {
                    tracing::debug!(
                        method = call.method.name(),
                        gas_limit,
                        "Contract call simulated"
                    );
                    return Ok(PreparedCall::new(call.clone(), gas_limit));
                }
                Ok(Err(e)) if e.as_error_resp().is_some() => {
                    return Err(BlockchainError::from_transport(e));
                }
                Ok(Err(e)) => {
                    timed_out = false;
                    tracing::warn!(provider_idx = i, error = %e, "RPC error during simulation");
                }
                Err(_) => {
                    timed_out = true;
                    tracing::warn!(provider_idx = i, "RPC timeout during simulation");
                }
            }
        }
        if timed_out {
            return Err(BlockchainError::Timeout(self.config.timeout_secs));
        }
        Err(BlockchainError::Rpc("All providers failed to simulate call".to_string()))
    }

}

#[async_trait]
impl RpcCapability for BlockchainClient {
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        BlockchainClient::get_balance(self, address).await
    }

    async fn simulate(&self, call: ContractCall) -> BlockchainResult<PreparedCall> {
        self.simulate_call(&call).await
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.url)
            .field("failover_urls", &self.config.failover_urls)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
