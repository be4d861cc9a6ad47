//! Demo data command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use dashboard_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct SeedArgs {}

pub async fn run(_args: SeedArgs, client: &ApiClient) -> Result<()> {
    eprintln!("{}", "Seeding demo data...".dimmed());

    let response = client.seed_data().await.context("Failed to seed data")?;

    output::success(&response.message);

    Ok(())
}
