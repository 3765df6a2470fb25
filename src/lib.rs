//! Tip jar dapp core: wallet-driven funding of a fixed contract with a
//! cosmetic coffee reward.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod tipjar;

pub use config::schema::TipJarConfig;
pub use tipjar::{TipJar, TipJarSettings};
