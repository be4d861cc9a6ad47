//! Notification commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use dashboard_core::models::{Notification, NotificationKind};
use dashboard_http::ApiClient;

use super::JsonArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NotificationsSubcommand {
    /// List notifications
    List(ListArgs),

    /// Mark one notification as read
    Read(NotificationArgs),

    /// Mark every notification as read
    ReadAll,

    /// Show the number of unread notifications
    UnreadCount,

    /// Delete a notification
    Delete(NotificationArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show unread notifications
    #[arg(long)]
    pub unread: bool,

    #[command(flatten)]
    pub output: JsonArgs,
}

#[derive(Args, Debug)]
pub struct NotificationArgs {
    /// Notification ID
    pub id: i64,
}

pub async fn handle(cmd: NotificationsCommand, client: &ApiClient) -> Result<()> {
    match cmd.command {
        NotificationsSubcommand::List(args) => list(args, client).await,
        NotificationsSubcommand::Read(args) => {
            let notification = client
                .mark_notification_read(args.id)
                .await
                .context("Failed to mark notification as read")?;
            print_notification(&notification);
            Ok(())
        }
        NotificationsSubcommand::ReadAll => {
            let response = client
                .mark_all_notifications_read()
                .await
                .context("Failed to mark notifications as read")?;
            output::success(&response.message);
            Ok(())
        }
        NotificationsSubcommand::UnreadCount => {
            let count = client
                .unread_count()
                .await
                .context("Failed to fetch unread count")?;
            println!("{}", count.unread_count);
            Ok(())
        }
        NotificationsSubcommand::Delete(args) => {
            client
                .delete_notification(args.id)
                .await
                .context("Failed to delete notification")?;
            output::success(&format!("Deleted notification #{}", args.id));
            Ok(())
        }
    }
}

async fn list(args: ListArgs, client: &ApiClient) -> Result<()> {
    let mut notifications = client
        .notifications()
        .await
        .context("Failed to list notifications")?;

    if args.unread {
        notifications.retain(|n| !n.is_read);
    }

    if args.output.pretty {
        return output::json_pretty(&notifications);
    }
    if args.output.json {
        return output::json_lines(&notifications);
    }

    if notifications.is_empty() {
        eprintln!("{}", "No notifications.".dimmed());
        return Ok(());
    }

    for notification in &notifications {
        print_notification(notification);
    }

    Ok(())
}

fn print_notification(n: &Notification) {
    let marker = if n.is_read { " ".normal() } else { "•".blue() };
    let title = match n.kind {
        NotificationKind::Success => n.title.green(),
        NotificationKind::Warning => n.title.yellow(),
        NotificationKind::Error => n.title.red(),
        NotificationKind::Info | NotificationKind::Unknown => n.title.normal(),
    };

    println!("{} #{} {} {}", marker, n.id, title, n.time_ago.dimmed());
    if !n.description.is_empty() {
        println!("    {}", n.description);
    }
}
