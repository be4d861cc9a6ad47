use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI binary against `api_url`, storing credentials under `data_dir`.
///
/// Runs on the blocking pool so the mock server keeps answering while the
/// child process waits on it.
pub async fn run_cli(args: &[&str], api_url: &str, data_dir: &Path) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let api_url = api_url.to_string();
    let data_dir = data_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashctl"));
        cmd.args(&args);
        cmd.env("DASHBOARD_API_URL", &api_url);
        cmd.env("DASHBOARD_DATA_DIR", &data_dir);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("DASHBOARD_PASSWORD");
        cmd.env_remove("RUST_LOG");
        cmd.output().expect("Failed to execute CLI")
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], api_url: &str, data_dir: &Path) -> String {
    let output = run_cli(args, api_url, data_dir).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn credentials_file(data_dir: &Path) -> PathBuf {
    data_dir.join("credentials.json")
}

/// Read the stored credential map.
pub fn stored_credentials(data_dir: &Path) -> BTreeMap<String, String> {
    let path = credentials_file(data_dir);
    match std::fs::read_to_string(&path) {
        Ok(contents) if !contents.trim().is_empty() => {
            serde_json::from_str(&contents).expect("credentials file should be valid JSON")
        }
        _ => BTreeMap::new(),
    }
}

/// Write a credential pair as if a previous login had stored it.
pub fn store_credentials(data_dir: &Path, access: &str, refresh: &str) {
    let mut map = BTreeMap::new();
    map.insert("access_token", access);
    map.insert("refresh_token", refresh);
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(
        credentials_file(data_dir),
        serde_json::to_string(&map).unwrap(),
    )
    .unwrap();
}
