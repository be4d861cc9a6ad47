//! dashboard-http - Authenticated HTTP client for the smart dashboard API.
//!
//! All calls flow through [`ApiClient::request`], which attaches the bearer
//! token, refreshes an expired token once and replays the request.
//!
//! # Example
//!
//! ```no_run
//! use dashboard_core::{ApiUrl, Credentials, MemoryTokenStore};
//! use dashboard_http::{ApiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), dashboard_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("http://localhost:8000/api")?);
//! let client = ApiClient::new(config, MemoryTokenStore::new()).await?;
//!
//! client.login(&Credentials::new("admin@example.com", "admin123")).await?;
//! for task in client.tasks().await? {
//!     println!("{} [{}]", task.title, task.priority);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod endpoints;
mod request;
mod resources;

pub use auth::LogoutOutcome;
pub use client::{ApiClient, RefreshOutcome};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use request::RequestOptions;

pub use reqwest::Method;
pub use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
