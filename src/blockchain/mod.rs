//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) + config (RPC URL, chains)
//!     → wallet.rs (key loading, chain lookup, signing, broadcast)
//!     → client.rs (RPC connection with timeouts, balances, simulation)
//!     → contract.rs (tip jar ABI, call preparation)
//!     → chain.rs (chain ID → descriptor)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod capability;
pub mod chain;
pub mod client;
pub mod contract;
pub mod types;
pub mod wallet;

pub use capability::{InjectedProvider, RpcCapability, WalletCapability};
pub use chain::{ChainDescriptor, ChainRegistry, NativeCurrency};
pub use client::BlockchainClient;
pub use contract::{ContractCall, ContractMethod, PreparedCall};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::LocalWallet;
