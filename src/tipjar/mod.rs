//! Tip jar front-end core.
//!
//! # Data Flow
//! ```text
//! control surface (console, UI)
//!     → orchestrator.rs (connect / refresh / fund / withdraw)
//!         → amount.rs (input validation)
//!         → blockchain capabilities (wallet + RPC)
//!         → rewards.rs (coffee pick)
//!         → cooldown.rs (refresh rate limit)
//!     → state.rs (watch channel snapshots)
//!     → notice.rs (user-visible failures)
//! ```

pub mod amount;
pub mod cooldown;
pub mod display;
pub mod notice;
pub mod orchestrator;
pub mod rewards;
pub mod state;

pub use amount::{parse_amount, AmountError};
pub use cooldown::Cooldown;
pub use notice::{ErrorKind, LogNotifier, Notice, Notifier, TipJarError};
pub use orchestrator::{TipJar, TipJarSettings};
pub use rewards::{Reward, RewardCatalog, COFFEE_CATALOG};
pub use state::{BalanceSnapshot, Phase, TipJarSnapshot, TipJarState};
