//! Transaction orchestrator: connect, refresh, fund, withdraw.
//!
//! # Flow
//! ```text
//! connect   → request_accounts → session
//! refresh   → cooldown.start → balance(user?) → balance(contract)
//! fund      → parse amount → chain_id → registry → simulate(fund) → send → reward → refresh
//! withdraw  → chain_id → registry → simulate(withdraw) → send → clear reward → refresh
//! ```
//!
//! # Design Decisions
//! - Operations never return errors; failures become notices
//! - One operation at a time: the phase doubles as the busy flag
//! - The phase guard restores the resting phase on every exit path
//! - Post-transaction refresh bypasses the cooldown gate and restarts it

use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;

use crate::blockchain::{
    BlockchainError, BlockchainResult, ChainRegistry, ContractCall, InjectedProvider,
};
use crate::config::validation::ValidationError;
use crate::config::{ConfigError, TipJarConfig};
use crate::observability::metrics;
use crate::tipjar::amount::parse_amount;
use crate::tipjar::cooldown::Cooldown;
use crate::tipjar::notice::{ErrorKind, Notice, Notifier, TipJarError};
use crate::tipjar::rewards::{Reward, RewardCatalog};
use crate::tipjar::state::{Phase, TipJarSnapshot, TipJarState};

/// Fixed inputs of an orchestrator instance.
#[derive(Debug, Clone)]
pub struct TipJarSettings {
    /// Tip jar contract; never changes at runtime.
    pub contract: Address,
    /// Seconds refresh stays disabled after each refresh.
    pub cooldown_secs: u32,
    /// Chains a wallet may report.
    pub chains: ChainRegistry,
}

impl TipJarSettings {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            cooldown_secs: 5,
            chains: ChainRegistry::default(),
        }
    }

    pub fn from_config(config: &TipJarConfig) -> Result<Self, ConfigError> {
        let contract = config.contract.address.parse().map_err(|e| {
            ConfigError::Validation(vec![ValidationError {
                field: "contract.address".to_string(),
                message: format!("invalid address: {}", e),
            }])
        })?;
        Ok(Self {
            contract,
            cooldown_secs: config.refresh.cooldown_secs,
            chains: ChainRegistry::from_config(&config.chains),
        })
    }
}

/// Restores the resting phase when an operation ends.
struct PhaseGuard<'a> {
    state: &'a watch::Sender<TipJarState>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.phase = s.resting_phase());
    }
}

/// The tip jar front-end state machine.
pub struct TipJar {
    provider: Option<InjectedProvider>,
    settings: TipJarSettings,
    catalog: RewardCatalog,
    notifier: Arc<dyn Notifier>,
    rng: Mutex<StdRng>,
    state: watch::Sender<TipJarState>,
    cooldown: Cooldown,
}

impl TipJar {
    /// Create an orchestrator. `provider` is `None` when no wallet is installed.
    pub fn new(
        settings: TipJarSettings,
        provider: Option<InjectedProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(TipJarState::default());
        Self {
            provider,
            settings,
            catalog: RewardCatalog::coffee(),
            notifier,
            rng: Mutex::new(StdRng::from_entropy()),
            state,
            cooldown: Cooldown::new(),
        }
    }

    /// Draw rewards from another catalog.
    pub fn with_catalog(mut self, catalog: RewardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use a specific random source (seeded in tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn has_wallet(&self) -> bool {
        self.provider.is_some()
    }

    pub fn contract(&self) -> Address {
        self.settings.contract
    }

    pub fn catalog(&self) -> &RewardCatalog {
        &self.catalog
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// Current state.
    pub fn state(&self) -> TipJarState {
        self.state.borrow().clone()
    }

    /// Current state with the cooldown counter.
    pub fn snapshot(&self) -> TipJarSnapshot {
        TipJarSnapshot {
            state: self.state(),
            cooldown: self.cooldown.remaining(),
        }
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<TipJarState> {
        self.state.subscribe()
    }

    /// Store the amount text the user typed.
    pub fn set_amount(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.pending_amount = text);
    }

    /// Ask the wallet for account access.
    pub async fn connect(&self) -> Option<Address> {
        let result = self.try_connect().await;
        self.finish("connect", result)
    }

    /// Re-read both balances, unless the cooldown is running.
    ///
    /// Returns whether a refresh ran. Query failures are logged, not notified.
    pub async fn refresh_balances(&self) -> bool {
        let remaining = self.cooldown.remaining();
        if remaining > 0 {
            tracing::debug!(remaining, "Refresh ignored during cooldown");
            return false;
        }
        let _guard = match self.begin(Phase::Refreshing) {
            Ok(guard) => guard,
            Err(e) => {
                self.finish::<()>("refresh", Err(e));
                return false;
            }
        };
        self.refresh_inner().await;
        true
    }

    /// Send `amount_text` ether to the jar and hand out a reward.
    pub async fn fund(&self, amount_text: &str) -> Option<TxHash> {
        let result = self.try_fund(amount_text).await;
        self.finish("fund", result)
    }

    /// Fund with the stored amount text.
    pub async fn fund_pending(&self) -> Option<TxHash> {
        let amount = self.state.borrow().pending_amount.clone();
        self.fund(&amount).await
    }

    /// Call the jar's `withdraw()` and take the reward back.
    pub async fn withdraw(&self) -> Option<TxHash> {
        let result = self.try_withdraw().await;
        self.finish("withdraw", result)
    }

    async fn try_connect(&self) -> Result<Address, TipJarError> {
        let provider = self.provider.as_ref().ok_or(TipJarError::NoWallet)?;
        let _guard = self.begin(Phase::Connecting)?;

        let accounts = provider
            .wallet
            .request_accounts()
            .await
            .map_err(TipJarError::ConnectFailed)?;
        let account = accounts
            .first()
            .copied()
            .ok_or(TipJarError::ConnectFailed(BlockchainError::UserRejected))?;

        self.state.send_modify(|s| s.account = Some(account));
        tracing::info!(account = %account, "Wallet connected");
        Ok(account)
    }

    async fn try_fund(&self, amount_text: &str) -> Result<TxHash, TipJarError> {
        let value = parse_amount(amount_text)?;
        let provider = self.provider.as_ref().ok_or(TipJarError::NoWallet)?;
        let _guard = self.begin(Phase::Funding)?;
        let account = self.connected_account()?;

        tracing::info!(amount = %amount_text.trim(), wei = %value, "Funding tip jar");
        let call = ContractCall::fund(self.settings.contract, account, value);
        let tx_hash = self
            .simulate_and_submit(provider, call)
            .await
            .map_err(TipJarError::TransactionFailed)?;

        let reward = self.draw_reward();
        self.state.send_modify(|s| {
            s.reward = Some(reward);
            s.pending_amount.clear();
        });
        tracing::info!(tx_hash = %tx_hash, reward = reward.name, "Tip jar funded");

        self.refresh_inner().await;
        Ok(tx_hash)
    }

    async fn try_withdraw(&self) -> Result<TxHash, TipJarError> {
        let provider = self.provider.as_ref().ok_or(TipJarError::NoWallet)?;
        let _guard = self.begin(Phase::Withdrawing)?;
        let account = self.connected_account()?;

        let call = ContractCall::withdraw(self.settings.contract, account);
        let tx_hash = self
            .simulate_and_submit(provider, call)
            .await
            .map_err(TipJarError::WithdrawFailed)?;

        self.state.send_modify(|s| s.reward = None);
        tracing::info!(tx_hash = %tx_hash, "Tip jar withdrawn");

        self.refresh_inner().await;
        Ok(tx_hash)
    }

    /// Chain lookup, simulation, then submission through the wallet.
    async fn simulate_and_submit(
        &self,
        provider: &InjectedProvider,
        call: ContractCall,
    ) -> BlockchainResult<TxHash> {
        let chain_id = provider.wallet.chain_id().await?;
        let chain = self.settings.chains.resolve(chain_id)?;
        tracing::debug!(
            chain_id = %chain.id,
            chain = %chain.name,
            rpc_url = %chain.rpc_url,
            method = call.method.name(),
            "Resolved active chain"
        );

        let prepared = provider.rpc.simulate(call).await?;
        provider.wallet.send_transaction(prepared, &chain).await
    }

    async fn refresh_inner(&self) {
        self.cooldown.start(self.settings.cooldown_secs);

        let Some(provider) = self.provider.as_ref() else {
            self.finish::<()>("refresh", Err(TipJarError::NoWallet));
            return;
        };

        let mut failed = false;
        let account = self.state.borrow().account;
        if let Some(account) = account {
            match provider.rpc.get_balance(account).await {
                Ok(balance) => self.state.send_modify(|s| s.balances.user = Some(balance)),
                Err(e) => {
                    failed = true;
                    tracing::warn!(account = %account, error = %e, "Failed to fetch user balance");
                }
            }
        }

        match provider.rpc.get_balance(self.settings.contract).await {
            Ok(balance) => {
                metrics::record_contract_balance(balance);
                self.state.send_modify(|s| s.balances.contract = Some(balance));
            }
            Err(e) => {
                failed = true;
                tracing::warn!(contract = %self.settings.contract, error = %e, "Failed to fetch contract balance");
            }
        }

        metrics::record_operation("refresh", if failed { "failed" } else { "success" });
    }

    /// Claim the busy flag for `phase`.
    fn begin(&self, phase: Phase) -> Result<PhaseGuard<'_>, TipJarError> {
        let mut acquired = false;
        self.state.send_if_modified(|s| {
            if s.is_busy() {
                return false;
            }
            s.phase = phase;
            acquired = true;
            true
        });
        if acquired {
            Ok(PhaseGuard { state: &self.state })
        } else {
            Err(TipJarError::Busy)
        }
    }

    fn connected_account(&self) -> Result<Address, TipJarError> {
        self.state.borrow().account.ok_or(TipJarError::NotConnected)
    }

    fn draw_reward(&self) -> Reward {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        self.catalog.pick(&mut *rng)
    }

    /// Convert an operation result into a notice and a metric.
    fn finish<T>(&self, operation: &'static str, result: Result<T, TipJarError>) -> Option<T> {
        match result {
            Ok(value) => {
                metrics::record_operation(operation, "success");
                Some(value)
            }
            Err(e) => {
                let outcome = match e.kind() {
                    ErrorKind::CapabilityAbsent => "unavailable",
                    ErrorKind::UserDeclined => "rejected",
                    ErrorKind::Validation => "invalid",
                    ErrorKind::Network => "failed",
                };
                metrics::record_operation(operation, outcome);
                tracing::warn!(operation, error = %e, outcome, "Operation failed");
                self.notifier.notify(Notice::from(&e));
                None
            }
        }
    }
}

impl std::fmt::Debug for TipJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TipJar")
            .field("contract", &self.settings.contract)
            .field("has_wallet", &self.has_wallet())
            .field("state", &*self.state.borrow())
            .field("cooldown", &self.cooldown.remaining())
            .finish()
    }
}
