//! Subcommand implementations.

pub mod auth;
pub mod feed;
pub mod notifications;
pub mod seed;
pub mod stats;
pub mod tasks;

use anyhow::Result;

use dashboard_http::ApiClient;

use crate::cli::Commands;

pub async fn handle(cmd: Commands, client: &ApiClient) -> Result<()> {
    match cmd {
        Commands::Auth(cmd) => auth::handle(cmd, client).await,
        Commands::Tasks(cmd) => tasks::handle(cmd, client).await,
        Commands::Notifications(cmd) => notifications::handle(cmd, client).await,
        Commands::Activities(args) => feed::run(args, client).await,
        Commands::Stats(cmd) => stats::handle(cmd, client).await,
        Commands::Seed(args) => seed::run(args, client).await,
    }
}

/// Output switches shared by listing commands.
#[derive(clap::Args, Debug, Default)]
pub struct JsonArgs {
    /// Print results as JSON, one object per line
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl JsonArgs {
    fn enabled(&self) -> bool {
        self.json || self.pretty
    }
}
