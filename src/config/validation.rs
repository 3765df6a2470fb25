//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Validate value ranges (timeouts > 0, cooldown > 0)
//! - Detect duplicate chain entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TipJarConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::TipJarConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TipJarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.contract.address.parse::<Address>() {
        Ok(address) if address.is_zero() => {
            errors.push(ValidationError::new("contract.address", "must not be the zero address"));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::new("contract.address", format!("invalid address: {}", e)));
        }
    }

    if let Err(e) = config.rpc.url.parse::<url::Url>() {
        errors.push(ValidationError::new("rpc.url", format!("invalid URL: {}", e)));
    }
    for (i, failover) in config.rpc.failover_urls.iter().enumerate() {
        if let Err(e) = failover.parse::<url::Url>() {
            errors.push(ValidationError::new(
                format!("rpc.failover_urls[{}]", i),
                format!("invalid URL: {}", e),
            ));
        }
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }

    if config.wallet.chain_id == 0 {
        errors.push(ValidationError::new("wallet.chain_id", "must be greater than 0"));
    }

    if config.refresh.cooldown_secs == 0 {
        errors.push(ValidationError::new("refresh.cooldown_secs", "must be greater than 0"));
    }

    let mut seen = HashSet::new();
    for (i, chain) in config.chains.iter().enumerate() {
        if chain.id == 0 {
            errors.push(ValidationError::new(format!("chains[{}].id", i), "must be greater than 0"));
        }
        if !seen.insert(chain.id) {
            errors.push(ValidationError::new(
                format!("chains[{}].id", i),
                format!("duplicate chain ID {}", chain.id),
            ));
        }
        if let Err(e) = chain.rpc_url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                format!("chains[{}].rpc_url", i),
                format!("invalid URL: {}", e),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address (host:port)",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
