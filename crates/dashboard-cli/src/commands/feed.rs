//! Activity feed command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use dashboard_core::models::ActivityKind;
use dashboard_http::ApiClient;

use super::JsonArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ActivitiesArgs {
    #[command(flatten)]
    pub output: JsonArgs,
}

pub async fn run(args: ActivitiesArgs, client: &ApiClient) -> Result<()> {
    let activities = client
        .activities()
        .await
        .context("Failed to fetch activities")?;

    if args.output.pretty {
        return output::json_pretty(&activities);
    }
    if args.output.json {
        return output::json_lines(&activities);
    }

    if activities.is_empty() {
        eprintln!("{}", "No recent activity.".dimmed());
        return Ok(());
    }

    for activity in &activities {
        let title = match activity.kind {
            ActivityKind::Success => activity.title.green(),
            ActivityKind::Warning => activity.title.yellow(),
            ActivityKind::Danger => activity.title.red(),
            ActivityKind::Info | ActivityKind::Unknown => activity.title.normal(),
        };
        println!("{} {}", title, activity.time_ago.dimmed());
    }

    Ok(())
}
