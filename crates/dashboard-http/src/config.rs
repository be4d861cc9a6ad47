//! Client configuration.

use dashboard_core::{ApiUrl, Result};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Settings for constructing an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin and path prefix that every request path is appended to.
    pub base_url: ApiUrl,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            user_agent: concat!("dashboard-http/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Configuration for a development server on localhost.
    pub fn local() -> Result<Self> {
        Ok(Self::new(ApiUrl::new(DEFAULT_API_URL)?))
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_config_points_at_dev_server() {
        let config = ClientConfig::local().unwrap();
        assert_eq!(
            config.base_url.endpoint("/tasks/"),
            "http://localhost:8000/api/tasks/"
        );
        assert!(config.user_agent.starts_with("dashboard-http/"));
    }

    #[test]
    fn user_agent_override() {
        let config = ClientConfig::local().unwrap().with_user_agent("dashctl/1.0");
        assert_eq!(config.user_agent, "dashctl/1.0");
    }
}
