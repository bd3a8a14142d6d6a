use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "custodian-cli")]
#[command(about = "Operator CLI for the custodian service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service liveness
    Health,
    /// Provision (or fetch) an identity by key
    Provision {
        #[arg(long)]
        key: String,
    },
    /// Sign a payment on behalf of an identity
    Pay {
        #[arg(long)]
        key: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: u64,
    },
    /// Opt an identity into holding an asset
    OptIn {
        #[arg(long)]
        key: String,
        #[arg(long)]
        asset_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/healthz", cli.url)).send().await?;
            println!("{}", res.status());
        }
        Commands::Provision { key } => {
            let res = client
                .post(format!("{}/v1/identities", cli.url))
                .json(&json!({ "key": key }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Pay {
            key,
            receiver,
            amount,
        } => {
            let res = client
                .post(format!(
                    "{}/v1/identities/{}/transactions/payment",
                    cli.url, key
                ))
                .json(&json!({ "receiver": receiver, "amount": amount }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::OptIn { key, asset_id } => {
            let res = client
                .post(format!(
                    "{}/v1/identities/{}/transactions/asset-opt-in",
                    cli.url, key
                ))
                .json(&json!({ "asset_id": asset_id }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
