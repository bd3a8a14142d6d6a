//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Recovery phrase (from the secret store)
//!     → account.rs (seed derivation, keypair, signing)
//!     → address.rs (checksummed public address)
//!     → params.rs (suggested parameters from the node, with timeout)
//!     → transaction.rs (build, canonical encoding, signature, txid)
//! ```
//!
//! # Security Constraints
//! - Key material lives only inside `Account`, zeroized on drop
//! - Recovery phrases are never logged or embedded in errors
//! - All node calls have configurable timeouts

pub mod account;
pub mod address;
pub mod params;
pub mod transaction;

pub use account::Account;
pub use address::Address;
pub use params::{NodeParamsClient, ParamsSource, StaticParams, SuggestedParams};
pub use transaction::{SignedTransaction, Transaction, TransactionBody};
