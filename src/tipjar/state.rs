//! UI-facing state owned by the orchestrator.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::tipjar::rewards::Reward;

/// Where the orchestrator is in its lifecycle.
///
/// ```text
/// Disconnected → Connecting → Idle ⇄ {Refreshing, Funding, Withdrawing}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Disconnected,
    Connecting,
    Idle,
    Refreshing,
    Funding,
    Withdrawing,
}

impl Phase {
    /// An operation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Connecting | Phase::Refreshing | Phase::Funding | Phase::Withdrawing
        )
    }
}

/// Last fetched balances, in wei. Absent until the first successful query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct BalanceSnapshot {
    pub user: Option<U256>,
    pub contract: Option<U256>,
}

/// Everything a view renders, except the cooldown counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct TipJarState {
    pub phase: Phase,
    pub account: Option<Address>,
    pub balances: BalanceSnapshot,
    pub reward: Option<Reward>,
    pub pending_amount: String,
}

impl TipJarState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Phase to return to once an operation finishes.
    pub fn resting_phase(&self) -> Phase {
        if self.is_connected() {
            Phase::Idle
        } else {
            Phase::Disconnected
        }
    }
}

/// State plus cooldown, as of one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipJarSnapshot {
    #[serde(flatten)]
    pub state: TipJarState,
    pub cooldown: u32,
}

impl TipJarSnapshot {
    /// The refresh control is enabled.
    pub fn can_refresh(&self) -> bool {
        !self.state.is_busy() && self.cooldown == 0
    }

    /// The fund control is enabled.
    pub fn can_fund(&self) -> bool {
        self.state.is_connected() && !self.state.is_busy() && !self.state.pending_amount.is_empty()
    }

    /// The withdraw control is offered only while a reward is shown.
    pub fn can_withdraw(&self) -> bool {
        self.state.reward.is_some() && !self.state.is_busy()
    }

    /// Label of the refresh control.
    pub fn refresh_label(&self) -> String {
        if self.cooldown > 0 {
            format!("Wait {}s", self.cooldown)
        } else if self.state.is_busy() {
            "Loading...".to_string()
        } else {
            "Refresh Balance".to_string()
        }
    }
}
