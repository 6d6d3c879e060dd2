//! Prints the first page of the storefront catalog.
//!
//! Run with: bc-catalog [OPTIONS_FILE]
//! Run with debug: RUST_LOG=bc_storefront=debug bc-catalog
//!
//! The options file is a JSON object holding `store_url`, `access_token`,
//! `client_id`, `channel_id` and optionally `home_url`. A minted token is
//! written back to it under `auth_token`. Without an argument the path is
//! taken from `BC_OPTIONS_FILE`, falling back to `bigcommerce.json`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bc_storefront::options::JsonFileOptionStore;
use bc_storefront::{CatalogClient, CredentialManager, StoreConfig};
use tracing_subscriber::EnvFilter;

const OPTIONS_FILE_ENV: &str = "BC_OPTIONS_FILE";
const DEFAULT_OPTIONS_FILE: &str = "bigcommerce.json";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn options_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(OPTIONS_FILE_ENV))
        .map_or_else(|| PathBuf::from(DEFAULT_OPTIONS_FILE), PathBuf::from)
}

async fn run(path: PathBuf) -> Result<String, BoxError> {
    let store = Arc::new(JsonFileOptionStore::new(path));
    let config = StoreConfig::from_options(&*store).await?;
    tracing::info!(store_hash = %config.store_hash(), "Configuration loaded");

    let credentials = Arc::new(CredentialManager::connect(config, store).await?);
    let catalog = CatalogClient::new(credentials);
    Ok(catalog.render_catalog_page().await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let path = options_path();
    tracing::debug!(path = %path.display(), "Reading options");

    match run(path).await {
        Ok(page) => {
            println!("{page}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch the catalog");
            ExitCode::FAILURE
        }
    }
}
