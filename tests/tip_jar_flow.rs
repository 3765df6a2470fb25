//! End-to-end orchestrator flows against mock capabilities.

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tipjar::blockchain::{ChainId, ChainRegistry, ContractMethod, InjectedProvider};
use tipjar::config::ChainConfig;
use tipjar::tipjar::{
    ErrorKind, Phase, Reward, RewardCatalog, TipJar, TipJarSettings, COFFEE_CATALOG,
};

mod common;
use common::{milli_eth, Harness, MockRpc, MockWallet, RecordingNotifier, JAR, USER};

#[tokio::test]
async fn test_connect_sets_session() {
    let h = Harness::new();
    assert_eq!(h.jar.state().phase, Phase::Disconnected);

    let account = h.jar.connect().await;

    assert_eq!(account, Some(USER));
    let state = h.jar.state();
    assert_eq!(state.account, Some(USER));
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_connect_without_wallet() {
    let (jar, notifier) = Harness::without_wallet();

    assert_eq!(jar.connect().await, None);

    assert!(jar.state().account.is_none());
    let notice = notifier.last().expect("notice raised");
    assert_eq!(notice.kind, ErrorKind::CapabilityAbsent);
    assert!(!notice.retryable);
    assert!(notice.message.contains("Install a wallet"));
}

#[tokio::test]
async fn test_fund_success() {
    let h = Harness::connected().await;
    h.jar.set_amount("0.05");
    let balance_calls_before = h.rpc.balance_calls.load(Ordering::SeqCst);

    let tx_hash = h.jar.fund_pending().await;

    assert!(tx_hash.is_some());
    let state = h.jar.state();
    assert_eq!(state.pending_amount, "");
    let reward = state.reward.expect("reward handed out");
    assert!(COFFEE_CATALOG.contains(&reward));
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(h.notifier.count(), 0);

    // Refresh ran: both balances queried and the cooldown restarted.
    assert_eq!(h.rpc.balance_calls.load(Ordering::SeqCst), balance_calls_before + 2);
    assert_eq!(state.balances.user, Some(milli_eth(10_000)));
    assert_eq!(state.balances.contract, Some(Default::default()));
    assert_eq!(h.jar.snapshot().cooldown, 5);

    let simulated = h.rpc.last_simulated.lock().unwrap().clone().unwrap();
    assert_eq!(simulated.method, ContractMethod::Fund);
    assert_eq!(simulated.value, milli_eth(50));
    assert_eq!(simulated.from, USER);
    assert_eq!(simulated.contract, JAR);

    let chain = h.wallet.last_chain.lock().unwrap().clone().unwrap();
    assert_eq!(chain.id, ChainId(31337));
    assert_eq!(chain.native_currency.decimals, 18);
}

#[tokio::test]
async fn test_fund_with_explicit_amount() {
    let h = Harness::connected().await;
    h.jar.set_amount("9");

    assert!(h.jar.fund("0.001").await.is_some());

    let simulated = h.rpc.last_simulated.lock().unwrap().clone().unwrap();
    assert_eq!(simulated.value, milli_eth(1));
    assert_eq!(h.jar.state().pending_amount, "");
}

#[tokio::test]
async fn test_withdraw_clears_reward() {
    let h = Harness::connected().await;
    h.jar.fund("0.01").await.expect("fund succeeds");
    assert!(h.jar.state().reward.is_some());
    let balance_calls_before = h.rpc.balance_calls.load(Ordering::SeqCst);

    let tx_hash = h.jar.withdraw().await;

    assert!(tx_hash.is_some());
    assert!(h.jar.state().reward.is_none());
    assert_eq!(h.rpc.balance_calls.load(Ordering::SeqCst), balance_calls_before + 2);

    let simulated = h.rpc.last_simulated.lock().unwrap().clone().unwrap();
    assert_eq!(simulated.method, ContractMethod::Withdraw);
    assert!(simulated.value.is_zero());
}

#[tokio::test]
async fn test_withdraw_without_reward_is_allowed() {
    let h = Harness::connected().await;

    assert!(h.jar.withdraw().await.is_some());

    assert!(h.jar.state().reward.is_none());
    assert_eq!(h.wallet.send_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refresh_starts_cooldown() {
    let h = Harness::connected().await;
    assert_eq!(h.jar.snapshot().cooldown, 0);

    assert!(h.jar.refresh_balances().await);

    assert_eq!(h.jar.snapshot().cooldown, 5);
    let state = h.jar.state();
    assert_eq!(state.balances.user, Some(milli_eth(10_000)));
    assert!(state.balances.contract.is_some());
    assert_eq!(state.phase, Phase::Idle);
}

#[tokio::test]
async fn test_refresh_disconnected_queries_contract_only() {
    let h = Harness::new();

    assert!(h.jar.refresh_balances().await);

    assert_eq!(h.rpc.balance_calls.load(Ordering::SeqCst), 1);
    let state = h.jar.state();
    assert!(state.balances.user.is_none());
    assert!(state.balances.contract.is_some());
    assert_eq!(state.phase, Phase::Disconnected);
}

#[tokio::test]
async fn test_refresh_gated_by_cooldown() {
    let h = Harness::connected().await;
    assert!(h.jar.refresh_balances().await);
    let calls = h.rpc.balance_calls.load(Ordering::SeqCst);

    assert!(!h.jar.refresh_balances().await);

    assert_eq!(h.rpc.balance_calls.load(Ordering::SeqCst), calls);
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.jar.snapshot().refresh_label(), "Wait 5s");
}

#[tokio::test(start_paused = true)]
async fn test_refresh_allowed_after_cooldown() {
    let h = Harness::connected().await;
    assert!(h.jar.refresh_balances().await);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(h.jar.snapshot().cooldown, 3);
    assert!(!h.jar.refresh_balances().await);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(h.jar.snapshot().cooldown, 0);
    assert!(h.jar.refresh_balances().await);
}

#[tokio::test]
async fn test_fund_refresh_ignores_running_cooldown() {
    let h = Harness::connected().await;
    assert!(h.jar.refresh_balances().await);
    let calls = h.rpc.balance_calls.load(Ordering::SeqCst);

    h.jar.fund("0.02").await.expect("fund succeeds");

    assert_eq!(h.rpc.balance_calls.load(Ordering::SeqCst), calls + 2);
    assert_eq!(h.jar.snapshot().cooldown, 5);
}

#[tokio::test]
async fn test_reward_distribution_is_uniform() {
    const TRIALS: usize = 3000;
    let h = Harness::with_seed(7);
    h.jar.connect().await;

    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for _ in 0..TRIALS {
        h.jar.fund("0.001").await.expect("fund succeeds");
        let reward = h.jar.state().reward.expect("reward set");
        *counts.entry(reward.name).or_default() += 1;
    }

    assert_eq!(counts.len(), COFFEE_CATALOG.len(), "every coffee shows up");
    let expected = TRIALS as f64 / COFFEE_CATALOG.len() as f64;
    let chi_square: f64 = counts
        .values()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // 9 degrees of freedom, p = 0.001
    assert!(chi_square < 27.88, "chi-square {chi_square} too large: {counts:?}");
}

#[tokio::test]
async fn test_state_changes_are_published() {
    let h = Harness::new();
    let mut rx = h.jar.subscribe();

    h.jar.connect().await;

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.account, Some(USER));
}

#[tokio::test]
async fn test_reconnect_keeps_reward() {
    let h = Harness::connected().await;
    h.jar.fund("0.01").await.expect("fund succeeds");

    assert_eq!(h.jar.connect().await, Some(USER));

    assert!(h.jar.state().reward.is_some());
}

static HOUSE_BLEND: [Reward; 1] = [Reward {
    name: "House Blend",
    icon_path: "/coffee/house.svg",
}];

#[tokio::test]
async fn test_custom_catalog() {
    let h = Harness::connected().await;
    let jar = h.jar.with_catalog(RewardCatalog::new(&HOUSE_BLEND));
    assert_eq!(jar.catalog().len(), 1);

    jar.fund("0.01").await.expect("fund succeeds");

    let reward = jar.state().reward.expect("reward set");
    assert_eq!(reward.name, "House Blend");
    assert!(jar.catalog().contains(&reward));
    assert_eq!(reward.caption(), "Enjoy your House Blend!");
}

#[tokio::test]
async fn test_snapshot_gates_buttons() {
    let h = Harness::connected().await;
    assert!(!h.jar.snapshot().can_fund());
    h.jar.set_amount("0.01");
    let snapshot = h.jar.snapshot();
    assert!(snapshot.can_refresh());
    assert!(snapshot.can_fund());
    assert!(!snapshot.can_withdraw());

    h.jar.fund_pending().await.expect("fund succeeds");

    assert!(h.jar.cooldown().is_active());
    let snapshot = h.jar.snapshot();
    assert!(!snapshot.can_refresh());
    assert!(snapshot.can_withdraw());
}

#[tokio::test]
async fn test_submit_receives_configured_chain_url() {
    let wallet = Arc::new(MockWallet::new());
    let rpc = Arc::new(MockRpc::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut settings = TipJarSettings::new(JAR);
    settings.chains = ChainRegistry::from_config(&[ChainConfig {
        id: 31337,
        name: "Devnet".to_string(),
        rpc_url: "http://devnet.internal:9545".to_string(),
    }]);
    let provider = InjectedProvider::new(wallet.clone(), rpc.clone());
    let jar = TipJar::new(settings, Some(provider), notifier.clone());

    jar.connect().await;
    jar.fund("0.01").await.expect("fund succeeds");

    let chain = wallet.last_chain.lock().unwrap().clone().unwrap();
    assert_eq!(chain.name, "Devnet");
    assert_eq!(chain.rpc_url.as_str(), "http://devnet.internal:9545/");
}
