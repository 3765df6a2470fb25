//! Shared test doubles for orchestrator integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, Address, TxHash, B256, U256};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Notify;

use tipjar::blockchain::{
    BlockchainError, BlockchainResult, ChainDescriptor, ChainId, ContractCall, InjectedProvider,
    PreparedCall, RpcCapability, WalletCapability,
};
use tipjar::tipjar::{Notice, Notifier, TipJar, TipJarSettings};

pub const JAR: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const USER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Wei in one milli-ether.
pub fn milli_eth(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000_000_000u64)
}

/// Scriptable wallet.
pub struct MockWallet {
    pub accounts: Mutex<Vec<Address>>,
    pub chain: AtomicU64,
    pub reject_connect: AtomicBool,
    pub reject_signature: AtomicBool,
    pub account_calls: AtomicUsize,
    pub chain_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub last_chain: Mutex<Option<ChainDescriptor>>,
    pub last_sent: Mutex<Option<PreparedCall>>,
    hold: Mutex<Option<Arc<Notify>>>,
    sending: Notify,
    nonce: AtomicU64,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(vec![USER]),
            chain: AtomicU64::new(31337),
            reject_connect: AtomicBool::new(false),
            reject_signature: AtomicBool::new(false),
            account_calls: AtomicUsize::new(0),
            chain_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            last_chain: Mutex::new(None),
            last_sent: Mutex::new(None),
            hold: Mutex::new(None),
            sending: Notify::new(),
            nonce: AtomicU64::new(1),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
            + self.chain_calls.load(Ordering::SeqCst)
            + self.send_calls.load(Ordering::SeqCst)
    }

    /// Make `send_transaction` wait until the returned gate is notified.
    pub fn hold_sends(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Resolves once a `send_transaction` call has started.
    pub async fn wait_until_sending(&self) {
        self.sending.notified().await;
    }
}

#[async_trait]
impl WalletCapability for MockWallet {
    async fn request_accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_connect.load(Ordering::SeqCst) {
            return Err(BlockchainError::UserRejected);
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChainId(self.chain.load(Ordering::SeqCst)))
    }

    async fn send_transaction(
        &self,
        call: PreparedCall,
        chain: &ChainDescriptor,
    ) -> BlockchainResult<TxHash> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.sending.notify_one();
        let gate = self.hold.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        *self.last_chain.lock().unwrap() = Some(chain.clone());
        *self.last_sent.lock().unwrap() = Some(call);
        if self.reject_signature.load(Ordering::SeqCst) {
            return Err(BlockchainError::UserRejected);
        }
        let n = self.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(B256::left_padding_from(&n.to_be_bytes()))
    }
}

/// Scriptable node.
pub struct MockRpc {
    pub balances: Mutex<HashMap<Address, U256>>,
    pub fail_balances: AtomicBool,
    pub revert_simulation: AtomicBool,
    pub balance_calls: AtomicUsize,
    pub simulate_calls: AtomicUsize,
    pub last_simulated: Mutex<Option<ContractCall>>,
}

impl MockRpc {
    pub fn new() -> Self {
        let mut balances = HashMap::new();
        balances.insert(USER, milli_eth(10_000));
        balances.insert(JAR, U256::ZERO);
        Self {
            balances: Mutex::new(balances),
            fail_balances: AtomicBool::new(false),
            revert_simulation: AtomicBool::new(false),
            balance_calls: AtomicUsize::new(0),
            simulate_calls: AtomicUsize::new(0),
            last_simulated: Mutex::new(None),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst) + self.simulate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcCapability for MockRpc {
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_balances.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("connection refused".to_string()));
        }
        Ok(self.balances.lock().unwrap().get(&address).copied().unwrap_or_default())
    }

    async fn simulate(&self, call: ContractCall) -> BlockchainResult<PreparedCall> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_simulated.lock().unwrap() = Some(call.clone());
        if self.revert_simulation.load(Ordering::SeqCst) {
            return Err(BlockchainError::Reverted("execution reverted".to_string()));
        }
        Ok(PreparedCall::new(call, 50_000))
    }
}

/// Collects every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// An orchestrator wired to mocks.
pub struct Harness {
    pub jar: TipJar,
    pub wallet: Arc<MockWallet>,
    pub rpc: Arc<MockRpc>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        let wallet = Arc::new(MockWallet::new());
        let rpc = Arc::new(MockRpc::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let provider = InjectedProvider::new(wallet.clone(), rpc.clone());
        let jar = TipJar::new(TipJarSettings::new(JAR), Some(provider), notifier.clone())
            .with_rng(StdRng::seed_from_u64(seed));
        Self {
            jar,
            wallet,
            rpc,
            notifier,
        }
    }

    /// Orchestrator with no wallet installed.
    pub fn without_wallet() -> (TipJar, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let jar = TipJar::new(TipJarSettings::new(JAR), None, notifier.clone());
        (jar, notifier)
    }

    pub fn capability_calls(&self) -> usize {
        self.wallet.total_calls() + self.rpc.total_calls()
    }

    /// Connected orchestrator.
    pub async fn connected() -> Self {
        let harness = Self::new();
        assert_eq!(harness.jar.connect().await, Some(USER));
        harness
    }
}
