//! Account and session commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use dashboard_core::models::User;
use dashboard_core::{Credentials, Registration};
use dashboard_http::{ApiClient, LogoutOutcome, RefreshOutcome};

use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the issued tokens
    Login(LoginArgs),

    /// Create a new account and log in
    Register(RegisterArgs),

    /// Revoke the session and clear stored tokens
    Logout,

    /// Display the authenticated user
    Whoami,

    /// Exchange the stored refresh token for a new access token
    Refresh,

    /// Show the local session state without contacting the server
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,
}

pub async fn handle(cmd: AuthCommand, client: &ApiClient) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login(args, client).await,
        AuthSubcommand::Register(args) => register(args, client).await,
        AuthSubcommand::Logout => logout(client).await,
        AuthSubcommand::Whoami => whoami(client).await,
        AuthSubcommand::Refresh => refresh(client).await,
        AuthSubcommand::Status => status(client).await,
    }
}

async fn login(args: LoginArgs, client: &ApiClient) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let response = client
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    match &response.user {
        Some(user) => print_user(user),
        None => output::field("Email", credentials.email()),
    }
    output::field("API", client.base_url().as_str());

    Ok(())
}

async fn register(args: RegisterArgs, client: &ApiClient) -> Result<()> {
    let registration = Registration::new(&args.username, &args.email, &args.password)
        .with_name(&args.first_name, &args.last_name);

    eprintln!("{}", "Creating account...".dimmed());

    let response = client
        .register(&registration)
        .await
        .context("Failed to create account")?;

    output::success("Account created");
    println!();
    if let Some(user) = &response.user {
        print_user(user);
    }

    Ok(())
}

async fn logout(client: &ApiClient) -> Result<()> {
    let outcome = client
        .logout()
        .await
        .context("Failed to clear stored credentials")?;

    if let LogoutOutcome::LocalOnly(err) = &outcome {
        output::warning(&format!("Server was not notified: {}", err));
    }
    output::success("Logged out");

    Ok(())
}

async fn whoami(client: &ApiClient) -> Result<()> {
    if !client.is_authenticated() {
        bail!("No active session. Run 'dashctl auth login' first.");
    }

    let user = client
        .current_user()
        .await
        .context("Failed to fetch current user")?;

    print_user(&user);

    Ok(())
}

async fn refresh(client: &ApiClient) -> Result<()> {
    match client.refresh_access_token().await {
        RefreshOutcome::Refreshed => {
            output::success("Access token refreshed");
            Ok(())
        }
        RefreshOutcome::NoRefreshToken => {
            bail!("No stored refresh token. Run 'dashctl auth login' first.")
        }
        RefreshOutcome::Rejected { status } => {
            bail!("Refresh token rejected (HTTP {}). Run 'dashctl auth login' again.", status)
        }
        RefreshOutcome::Failed(err) => Err(err).context("Failed to refresh access token"),
    }
}

async fn status(client: &ApiClient) -> Result<()> {
    let has_refresh = client
        .has_refresh_token()
        .await
        .context("Failed to read stored credentials")?;

    output::field("API", client.base_url().as_str());
    output::field("Access token", present(client.is_authenticated()));
    output::field("Refresh token", present(has_refresh));

    Ok(())
}

fn present(flag: bool) -> &'static str {
    if flag { "stored" } else { "none" }
}

fn print_user(user: &User) {
    output::field("User", &user.display_name());
    output::field("Username", &user.username);
    output::field("Email", &user.email);
    output::field("Role", &user.role);
}
