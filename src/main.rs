//! Ballast main entry point

use anyhow::Context;
use ballast_api::start_server;
use ballast_config::Config;
use ballast_core::TransactionStore;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "ballast")]
#[command(version = "0.1.0")]
#[command(about = "Transaction filter and related-content API for the Ballast dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the data file from the configuration
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Missing config file means defaults; any other problem is fatal and
/// reported with its field and suggestions
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to load {}\n{}", path.display(), e.to_details()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = load_config(&args.config)?;
    if let Some(data) = args.data {
        config.data.file = data;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if !args.config.exists() {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }
    log::info!("Config loaded: data file={}", config.data.file.display());

    let rt = Runtime::new()?;
    rt.block_on(async {
        let store = TransactionStore::open(config.data.file.clone())
            .await
            .with_context(|| format!("Failed to load data from {}", config.data.file.display()))?;
        start_server(config, Arc::new(RwLock::new(store))).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("/no/such/ballast-config.yaml")).unwrap();
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_invalid_config_reports_field() {
        let path = std::env::temp_dir().join(format!("ballast-invalid-{}.yaml", std::process::id()));
        std::fs::write(&path, "server:\n  port: 0\n").unwrap();

        let message = load_config(&path).unwrap_err().to_string();
        std::fs::remove_file(&path).unwrap();

        assert!(message.contains("[INVALID_VALUE]"));
        assert!(message.contains("Field: server.port"));
        assert!(message.contains("Port must be greater than 0"));
    }
}
