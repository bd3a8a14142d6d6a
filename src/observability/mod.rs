//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, Prometheus exposition)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON optional)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging; request IDs flow through tower middleware
//! - Metric updates are cheap counter increments
//! - No log field ever carries a recovery phrase or key bytes

pub mod logging;
pub mod metrics;
