//! Operation errors and the notices they turn into.
//!
//! Every orchestrator operation catches its own errors and hands a `Notice`
//! to the injected `Notifier`; nothing propagates past the operation.

use serde::Serialize;
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::tipjar::amount::AmountError;

/// Failure categories, ordered by what the user has to do about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No wallet is installed; nothing works until one is.
    CapabilityAbsent,
    /// The user declined in the wallet; they can try again.
    UserDeclined,
    /// Bad input; the user has to correct it.
    Validation,
    /// Node, simulation or broadcast failure; transient.
    Network,
}

/// Errors raised inside orchestrator operations.
#[derive(Debug, Error)]
pub enum TipJarError {
    #[error("no wallet capability available")]
    NoWallet,

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("no account connected")]
    NotConnected,

    #[error("another operation is in progress")]
    Busy,

    #[error("connect failed: {0}")]
    ConnectFailed(#[source] BlockchainError),

    #[error("fund failed: {0}")]
    TransactionFailed(#[source] BlockchainError),

    #[error("withdraw failed: {0}")]
    WithdrawFailed(#[source] BlockchainError),
}

impl TipJarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TipJarError::NoWallet => ErrorKind::CapabilityAbsent,
            TipJarError::InvalidAmount(_) | TipJarError::NotConnected | TipJarError::Busy => {
                ErrorKind::Validation
            }
            TipJarError::ConnectFailed(e)
            | TipJarError::TransactionFailed(e)
            | TipJarError::WithdrawFailed(e) => {
                if e.is_user_rejection() {
                    ErrorKind::UserDeclined
                } else {
                    ErrorKind::Network
                }
            }
        }
    }

    /// Everything but a missing wallet can be retried by the user.
    pub fn is_retryable(&self) -> bool {
        self.kind() != ErrorKind::CapabilityAbsent
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            TipJarError::NoWallet => "No wallet found. Install a wallet extension to continue.",
            TipJarError::InvalidAmount(_) => "Please enter a valid amount!",
            TipJarError::NotConnected => "Connect your wallet first.",
            TipJarError::Busy => "Another request is still in progress.",
            TipJarError::ConnectFailed(_) => "Failed to connect wallet. Please try again.",
            TipJarError::TransactionFailed(_) => "Transaction failed. Please try again.",
            TipJarError::WithdrawFailed(_) => "Withdrawal failed. Please try again.",
        }
    }
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl From<&TipJarError> for Notice {
    fn from(err: &TipJarError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message().to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Where notices go: an alert dialog, a console line, a test log.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(kind = ?notice.kind, retryable = notice.retryable, "{}", notice.message);
    }
}
