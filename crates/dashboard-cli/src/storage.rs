//! Credential storage location and client construction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use dashboard_core::ApiUrl;
use dashboard_http::{ApiClient, ClientConfig};
use dashboard_store::FileTokenStore;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Get the credentials file path, creating its directory if needed.
pub fn credentials_path(data_dir: Option<&Path>) -> Result<PathBuf> {
    let data_dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => ProjectDirs::from("", "", "dashctl")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(CREDENTIALS_FILE))
}

/// Build the process-wide API client over the stored credentials.
pub async fn connect(api_url: &str, data_dir: Option<&Path>) -> Result<ApiClient> {
    let base = ApiUrl::new(api_url).context("Invalid API URL")?;
    let path = credentials_path(data_dir)?;
    tracing::debug!(path = %path.display(), "Using credential store");

    let config = ClientConfig::new(base)
        .with_user_agent(concat!("dashctl/", env!("CARGO_PKG_VERSION")));

    ApiClient::new(config, FileTokenStore::new(path))
        .await
        .context("Failed to load stored credentials")
}
