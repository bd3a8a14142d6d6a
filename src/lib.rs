//! Custodial key management and transaction signing service.
//!
//! Associates opaque caller-supplied identity keys with chain
//! keypairs, keeps each keypair's recovery phrase in an external
//! Vault-style cubbyhole, and signs payment and asset transactions on
//! behalf of those identities. Private keys and recovery phrases
//! never leave the process.

// Core subsystems
pub mod chain;
pub mod codec;
pub mod error;
pub mod provision;
pub mod signing;
pub mod store;

// Service surface
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::CustodianConfig;
pub use error::{CustodyError, CustodyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
