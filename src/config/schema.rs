//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML file.

use serde::{Deserialize, Serialize};

/// Root configuration for the tip jar.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TipJarConfig {
    /// Deployed tip jar contract.
    pub contract: ContractConfig,

    /// Node the balance queries and simulations go to.
    pub rpc: RpcConfig,

    /// Local signing wallet.
    pub wallet: WalletConfig,

    /// Balance refresh rate limiting.
    pub refresh: RefreshConfig,

    /// Chains the wallet may report, with their RPC endpoints.
    pub chains: Vec<ChainConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for TipJarConfig {
    fn default() -> Self {
        Self {
            contract: ContractConfig::default(),
            rpc: RpcConfig::default(),
            wallet: WalletConfig::default(),
            refresh: RefreshConfig::default(),
            chains: ChainConfig::local_defaults(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Tip jar contract settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract address (hex, 0x-prefixed).
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            // First contract deployed by Anvil's account #0.
            address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
        }
    }
}

/// JSON-RPC endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// Wallet settings. The key itself only ever comes from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Chain ID the wallet signs for (31337 for local Anvil).
    pub chain_id: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self { chain_id: 31337 }
    }
}

/// Balance refresh settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds a refresh stays disabled after each refresh.
    pub cooldown_secs: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { cooldown_secs: 5 }
    }
}

/// A chain the wallet may be connected to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain ID.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// RPC endpoint serving this chain.
    pub rpc_url: String,
}

impl ChainConfig {
    /// Local development chains (Anvil and Ganache/Hardhat-style 1337).
    pub fn local_defaults() -> Vec<Self> {
        vec![
            Self {
                id: 31337,
                name: "Anvil".to_string(),
                rpc_url: "http://localhost:8545".to_string(),
            },
            Self {
                id: 1337,
                name: "Localhost".to_string(),
                rpc_url: "http://localhost:8545".to_string(),
            },
        ]
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub log_json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
