//! Chain descriptors handed to the wallet when submitting a transaction.
//!
//! The wallet reports which chain it is on; the registry turns that ID into a
//! descriptor whose RPC URL belongs to that chain. IDs without an entry are
//! rejected instead of being paired with an unrelated endpoint.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::schema::ChainConfig;

/// Native currency metadata of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl NativeCurrency {
    /// 18-decimal ether.
    pub fn ether() -> Self {
        Self {
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// Everything the submit step needs to know about the active chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: ChainId,
    pub name: String,
    pub native_currency: NativeCurrency,
    pub rpc_url: url::Url,
}

/// Known chains, keyed by chain ID.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: Vec<ChainDescriptor>,
}

impl ChainRegistry {
    /// Build a registry from configuration entries.
    ///
    /// Entries with an unparsable RPC URL are skipped with a warning; config
    /// validation normally rejects them before this point.
    pub fn from_config(entries: &[ChainConfig]) -> Self {
        let mut chains = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.rpc_url.parse() {
                Ok(rpc_url) => chains.push(ChainDescriptor {
                    id: ChainId(entry.id),
                    name: entry.name.clone(),
                    native_currency: NativeCurrency::ether(),
                    rpc_url,
                }),
                Err(e) => {
                    tracing::warn!(chain_id = entry.id, url = %entry.rpc_url, error = %e, "Ignoring chain with invalid RPC URL");
                }
            }
        }
        Self { chains }
    }

    /// Resolve the descriptor for a chain ID reported by the wallet.
    pub fn resolve(&self, id: ChainId) -> BlockchainResult<ChainDescriptor> {
        self.chains
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(BlockchainError::UnsupportedChain(id.0))
    }

    /// Number of known chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::from_config(&ChainConfig::local_defaults())
    }
}
