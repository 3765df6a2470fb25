//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator and blockchain clients produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (operation counters, balance gauge)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
