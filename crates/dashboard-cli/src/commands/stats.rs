//! Dashboard statistics commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use dashboard_core::models::ChartPeriod;
use dashboard_http::ApiClient;

use super::JsonArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct StatsCommand {
    #[command(subcommand)]
    pub command: StatsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum StatsSubcommand {
    /// Show the headline dashboard figures
    Dashboard(JsonArgs),

    /// Show chart series for a period
    Chart(ChartArgs),
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Chart period (week, month, year)
    #[arg(long, default_value_t = ChartPeriod::Week)]
    pub period: ChartPeriod,

    #[command(flatten)]
    pub output: JsonArgs,
}

pub async fn handle(cmd: StatsCommand, client: &ApiClient) -> Result<()> {
    match cmd.command {
        StatsSubcommand::Dashboard(args) => dashboard(args, client).await,
        StatsSubcommand::Chart(args) => chart(args, client).await,
    }
}

async fn dashboard(args: JsonArgs, client: &ApiClient) -> Result<()> {
    let stats = client
        .dashboard_stats()
        .await
        .context("Failed to fetch dashboard statistics")?;

    if args.enabled() {
        return output::json_pretty(&stats);
    }

    output::field("Total revenue", &format!("{:.2}", stats.total_revenue));
    output::field("Active users", &stats.active_users.to_string());
    output::field("Completed projects", &stats.completed_projects.to_string());
    output::field("Conversion rate", &format!("{:.2}%", stats.conversion_rate));
    output::field("Total sales", &format!("{:.2}", stats.total_sales));

    let dist = &stats.sales_distribution;
    println!();
    println!("{}", "Sales distribution".bold());
    output::field("  Products", &format!("{:.2}", dist.products));
    output::field("  Services", &format!("{:.2}", dist.services));
    output::field("  Subscriptions", &format!("{:.2}", dist.subscriptions));
    output::field("  Consulting", &format!("{:.2}", dist.consulting));

    Ok(())
}

async fn chart(args: ChartArgs, client: &ApiClient) -> Result<()> {
    let chart = client
        .chart_data(args.period)
        .await
        .with_context(|| format!("Failed to fetch {} chart", args.period))?;

    if args.output.enabled() {
        return output::json_pretty(&chart);
    }

    for dataset in &chart.datasets {
        println!("{}", dataset.label.bold());
        for (label, value) in chart.labels.iter().zip(&dataset.data) {
            output::field(&format!("  {}", label), &format!("{:.2}", value));
        }
    }

    Ok(())
}
