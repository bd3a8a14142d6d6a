//! Custodian service binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                   CUSTODIAN                     │
//!                    │                                                 │
//!   Client Request   │  ┌────────┐   ┌───────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ provision │──▶│ secret store│──┼──▶ Vault
//!                    │  │ server │   │  signing  │   │   client    │  │
//!                    │  └────────┘   └─────┬─────┘   └─────────────┘  │
//!                    │                     │         ┌─────────────┐  │
//!                    │                     └────────▶│ chain params│──┼──▶ Node
//!   Client Response  │  ┌────────┐   ┌───────────┐   │   client    │  │
//!   ◀────────────────┼──│ error  │◀──│  response │   └─────────────┘  │
//!                    │  │mapping │   │   codec   │                    │
//!                    │  └────────┘   └───────────┘                    │
//!                    │                                                 │
//!                    │  config · observability · lifecycle             │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! Startup is ordered and fail-fast: config, logging, credentials,
//! clients, listener.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use custodian::chain::{NodeParamsClient, ParamsSource};
use custodian::config::{load_config, load_vault_token, CustodianConfig};
use custodian::lifecycle::{self, Shutdown};
use custodian::observability::{logging, metrics};
use custodian::store::{SecretStore, VaultClient};
use custodian::HttpServer;

#[derive(Parser)]
#[command(name = "custodian")]
#[command(about = "Custodial key management and transaction signing service")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "custodian.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        CustodianConfig::default()
    };

    logging::init_logging(&config.observability);
    tracing::info!("custodian v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        vault_address = %config.vault.address,
        node_url = %config.node.url,
        "Configuration loaded"
    );

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

    // Credentials come only from the environment; fail fast if absent.
    let token = load_vault_token(&config.vault)?;
    let store: Arc<dyn SecretStore> = Arc::new(VaultClient::new(&config.vault, token)?);
    let params: Arc<dyn ParamsSource> = Arc::new(NodeParamsClient::new(&config.node)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    lifecycle::wire_signals(&shutdown);

    let server = HttpServer::new(&config, store, params);
    server.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
