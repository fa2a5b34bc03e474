use ledger_validator::{api::Server, config::Config};
use tracing::info;

/// Entry point for the validation service.
///
/// Initializes logging, loads the configuration (path from the first argument,
/// `config/default.toml` otherwise) and serves the JSON-RPC endpoint.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(&path)?;
    info!(
        "Validator starting for account {} on ledger {}",
        config.plugin.account, config.plugin.prefix
    );

    let server = Server::new(config);
    server.start().await?;

    Ok(())
}
