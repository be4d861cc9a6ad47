//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dashboard_http::DEFAULT_API_URL;

use crate::commands::auth::AuthCommand;
use crate::commands::feed::ActivitiesArgs;
use crate::commands::notifications::NotificationsCommand;
use crate::commands::seed::SeedArgs;
use crate::commands::stats::StatsCommand;
use crate::commands::tasks::TasksCommand;

/// Command-line client for the smart dashboard API.
#[derive(Parser, Debug)]
#[command(name = "dashctl")]
#[command(author, version = env!("DASHCTL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Base URL of the dashboard API
    #[arg(long, global = true, env = "DASHBOARD_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding stored credentials
    #[arg(long, global = true, env = "DASHBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Task list operations
    Tasks(TasksCommand),

    /// Notification operations
    Notifications(NotificationsCommand),

    /// Show the activity feed
    Activities(ActivitiesArgs),

    /// Dashboard statistics
    Stats(StatsCommand),

    /// Create demo data on a development server
    Seed(SeedArgs),
}
