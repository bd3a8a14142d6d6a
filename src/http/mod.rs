//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, timeout / trace / request-id layers)
//!     → handlers.rs (DTO validation, dispatch to core)
//!     → provision / signing / codec
//!     → response.rs (error kind → status code mapping)
//! ```
//!
//! The routing layer owns request-shape validation (identity key
//! charset, base64 fields); the core never trusts it and treats bad
//! paths as not-found regardless.

pub mod handlers;
pub mod response;
pub mod server;

pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
