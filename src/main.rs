//! Tip jar console.
//!
//! A line-oriented control surface over the orchestrator: connect a wallet,
//! fund the jar, collect a coffee, withdraw.
//!
//! ```text
//!   stdin commands ──▶ TipJar ──▶ wallet (TIPJAR_PRIVATE_KEY) ──▶ node
//!        ▲                │
//!        └── status ◀─────┘ notices → stderr
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tipjar::blockchain::{wallet::PRIVATE_KEY_ENV_VAR, BlockchainClient, InjectedProvider, LocalWallet};
use tipjar::config::validation::validate_config;
use tipjar::config::{load_config, ConfigError, TipJarConfig};
use tipjar::observability::{logging, metrics};
use tipjar::tipjar::display::{display_balance, short_address};
use tipjar::tipjar::{Notice, Notifier, TipJar, TipJarSettings, TipJarSnapshot};

#[derive(Parser)]
#[command(name = "tipjar")]
#[command(about = "Fund the tip jar contract and get a surprise coffee", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the contract address from the config.
    #[arg(long)]
    contract: Option<String>,
}

/// Prints notices the way the page raised alerts.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("! {}", notice.message);
    }
}

enum Command {
    Connect,
    Refresh,
    Amount(String),
    Fund(Option<String>),
    Withdraw,
    Status { json: bool },
    Help,
    Quit,
}

/// Apply command-line overrides and validate the result.
fn apply_overrides(mut config: TipJarConfig, cli: &Cli) -> Result<TipJarConfig, ConfigError> {
    if let Some(contract) = &cli.contract {
        config.contract.address = contract.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err(String::new());
    };
    let arg = parts.next().map(str::to_string);
    match verb {
        "connect" => Ok(Command::Connect),
        "refresh" => Ok(Command::Refresh),
        "amount" => arg
            .map(Command::Amount)
            .ok_or_else(|| "usage: amount <eth>".to_string()),
        "fund" => Ok(Command::Fund(arg)),
        "withdraw" => Ok(Command::Withdraw),
        "status" => Ok(Command::Status {
            json: arg.as_deref() == Some("--json"),
        }),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

const HELP: &str = "\
commands:
  connect          connect your wallet
  refresh          refresh balances (5s cooldown)
  amount <eth>     set the amount to fund
  fund [eth]       fund the contract and get a random coffee
  withdraw         withdraw funds (available while you hold a coffee)
  status [--json]  show balances and reward
  quit             exit";

fn render(snapshot: &TipJarSnapshot) {
    let state = &snapshot.state;
    match &state.account {
        None => println!("Connect your wallet to get started"),
        Some(account) => {
            println!("Wallet Connected: {}", short_address(account));
            println!("  Your Balance:     {}", display_balance(state.balances.user));
            println!("  Contract Balance: {}", display_balance(state.balances.contract));
            println!("  [{}]", snapshot.refresh_label());
            if !state.pending_amount.is_empty() {
                println!("  Amount (ETH): {}", state.pending_amount);
            }
            match &state.reward {
                Some(reward) => {
                    println!("  Your Coffee Reward: {}", reward.name);
                    println!("  {}", reward.caption());
                    println!("  Your coffee stays until you withdraw funds");
                }
                None => println!("  Fund the contract to get your surprise coffee!"),
            }
        }
    }
}

async fn build_provider(config: &TipJarConfig) -> Option<InjectedProvider> {
    let rpc_url: url::Url = match config.rpc.url.parse() {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(url = %config.rpc.url, error = %e, "Invalid RPC URL");
            return None;
        }
    };

    let wallet = match LocalWallet::from_env(config.wallet.chain_id, rpc_url) {
        Ok(wallet) => wallet,
        Err(e) => {
            tracing::warn!(error = %e, "No wallet available; set {} to enable one", PRIVATE_KEY_ENV_VAR);
            return None;
        }
    };
    let client = match BlockchainClient::new(config.rpc.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create RPC client");
            return None;
        }
    };

    // A mismatch is only a warning; the orchestrator checks the chain per transaction.
    if let Err(e) = client.verify_chain_id(wallet.signing_chain_id()).await {
        tracing::warn!(error = %e, "Node chain check failed");
    }
    tracing::info!(account = %wallet.address(), "Local wallet ready");

    Some(InjectedProvider::new(Arc::new(wallet), Arc::new(client)))
}

async fn dispatch(jar: &TipJar, command: Command) -> bool {
    match command {
        Command::Connect => {
            jar.connect().await;
            render(&jar.snapshot());
        }
        Command::Refresh => {
            if !jar.refresh_balances().await {
                println!("[{}]", jar.snapshot().refresh_label());
            }
            render(&jar.snapshot());
        }
        Command::Amount(text) => jar.set_amount(text),
        Command::Fund(amount) => {
            if let Some(amount) = amount {
                jar.set_amount(amount);
            }
            if let Some(tx_hash) = jar.fund_pending().await {
                println!("Transaction Hash: {}", tx_hash);
            }
            render(&jar.snapshot());
        }
        Command::Withdraw => {
            if let Some(tx_hash) = jar.withdraw().await {
                println!("Withdraw Transaction Hash: {}", tx_hash);
            }
            render(&jar.snapshot());
        }
        Command::Status { json } => {
            let snapshot = jar.snapshot();
            if json {
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("! failed to encode status: {}", e),
                }
            } else {
                render(&snapshot);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TipJarConfig::default(),
    };
    let config = apply_overrides(config, &cli)?;

    logging::init_logging(&config.observability);
    tracing::info!("tipjar v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let settings = TipJarSettings::from_config(&config)?;
    tracing::info!(
        contract = %settings.contract,
        cooldown_secs = settings.cooldown_secs,
        chains = settings.chains.len(),
        "Configuration loaded"
    );

    let provider = build_provider(&config).await;
    let jar = TipJar::new(settings, provider, Arc::new(ConsoleNotifier));

    println!("Buy Me a Coffee");
    println!("Fund the contract and get a surprise coffee reward");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(command) => {
                        if !dispatch(&jar, command).await {
                            break;
                        }
                    }
                    Err(message) if message.is_empty() => {}
                    Err(message) => eprintln!("{}", message),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
