//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CustodianConfig (validated, immutable)
//!     → passed explicitly into each client constructor
//!
//! Vault token:
//!     environment variable (name from config)
//!     → loader.rs (read at startup, fail fast if absent)
//!     → VaultClient (held in memory only)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Credentials never appear in the config file or in source;
//!   only the *name* of the environment variable is configurable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_vault_token, ConfigError};
pub use schema::{CustodianConfig, NodeConfig, VaultConfig};
