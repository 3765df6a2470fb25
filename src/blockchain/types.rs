//! Chain-specific types and error definitions.

use alloy::transports::TransportError;
use thiserror::Error;

/// EIP-1193 error code a wallet returns when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Call was reverted by the contract.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// The wallet holder declined the request.
    #[error("Request rejected by user")]
    UserRejected,

    /// Invalid private key format or signing error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Wallet is connected to a different chain than the one requested.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// No chain descriptor is known for this chain ID.
    #[error("Unsupported chain ID {0}")]
    UnsupportedChain(u64),
}

impl BlockchainError {
    /// Classify a transport error coming back from a node or wallet.
    pub fn from_transport(err: TransportError) -> Self {
        if let Some(payload) = err.as_error_resp() {
            if payload.code == USER_REJECTED_CODE {
                return BlockchainError::UserRejected;
            }
            if payload.message.contains("revert") {
                return BlockchainError::Reverted(payload.message.to_string());
            }
        }
        BlockchainError::Rpc(err.to_string())
    }

    /// Whether the wallet holder declined the request.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, BlockchainError::UserRejected)
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
