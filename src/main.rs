//! ledgerweb main entry point

use anyhow::Context;
use clap::Parser;
use ledgerweb_api::start_server;
use ledgerweb_config::Config;
use ledgerweb_core::{LedgerStore, TransactionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ledgerweb")]
#[command(version)]
#[command(about = "A small JSON transaction ledger served over HTTP", long_about = None)]
struct Args {
    /// Configuration file path (defaults apply when the file is absent)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config_found = args.config.exists();
    let mut config = Config::load_or_default(args.config.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e.to_details()))?;

    if let Some(port) = args.port {
        config.server.port = port;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid --port: {}", e.to_details()))?;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::info!("No config file at {}, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let store = LedgerStore::from_config(&config);
    log::info!(
        "Ledger file: {} (backup: {}, read policy: {})",
        store.ledger_path().display(),
        store.backup_path().display(),
        store.read_policy()
    );

    store
        .initialize()
        .await
        .with_context(|| format!("Failed to initialize ledger {}", store.ledger_path().display()))?;

    start_server(config, Arc::new(store))
        .await
        .context("Server error")
}
