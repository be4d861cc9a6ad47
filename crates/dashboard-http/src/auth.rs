//! Account operations: register, login, logout, profile.

use tracing::{debug, info, instrument, warn};

use dashboard_core::models::{AuthResponse, MessageResponse, User};
use dashboard_core::{Credentials, Error, REFRESH_TOKEN_KEY, Registration, Result};

use crate::client::{ApiClient, decode_error};
use crate::endpoints::{AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, AUTH_REGISTER, RefreshRequest, SEED};
use crate::request::RequestOptions;

/// Result of [`ApiClient::logout`].
///
/// Local credentials are cleared in both cases; the variant only records
/// whether the server was told.
#[derive(Debug)]
#[must_use]
pub enum LogoutOutcome {
    /// The server acknowledged the logout.
    Notified,
    /// The server call failed and was ignored.
    LocalOnly(Error),
}

impl LogoutOutcome {
    pub fn server_notified(&self) -> bool {
        matches!(self, LogoutOutcome::Notified)
    }
}

impl ApiClient {
    /// Create an account and store the issued credentials.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        info!("Registering account");
        let options = RequestOptions::post().json(registration)?;
        let response: AuthResponse = self.request_json(AUTH_REGISTER, options).await?;
        self.set_credentials(response.tokens.access.clone(), response.tokens.refresh.clone())
            .await?;
        debug!("Account registered");
        Ok(response)
    }

    /// Log in with email and password and store the issued credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        info!("Logging in");
        let options = RequestOptions::post().json(credentials)?;
        let response: AuthResponse = self.request_json(AUTH_LOGIN, options).await?;
        self.set_credentials(response.tokens.access.clone(), response.tokens.refresh.clone())
            .await?;
        debug!("Logged in");
        Ok(response)
    }

    /// Tell the server to revoke the refresh token, then clear local
    /// credentials whatever the server said.
    ///
    /// # Errors
    ///
    /// Only a failure to clear the local store is returned; server and
    /// network failures are reported as [`LogoutOutcome::LocalOnly`].
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<LogoutOutcome> {
        let refresh = match self.store().get(REFRESH_TOKEN_KEY).await {
            Ok(refresh) => refresh,
            Err(err) => {
                warn!(error = %err, "Failed to read refresh token for logout");
                None
            }
        };

        let outcome = match RequestOptions::post().json(&RefreshRequest {
            refresh: refresh.as_deref(),
        }) {
            Ok(options) => match self.request(AUTH_LOGOUT, options).await {
                Ok(_) => LogoutOutcome::Notified,
                Err(err) => {
                    warn!(error = %err, "Server logout failed, clearing local credentials anyway");
                    LogoutOutcome::LocalOnly(err)
                }
            },
            Err(err) => LogoutOutcome::LocalOnly(err),
        };

        self.clear_credentials().await?;
        info!("Logged out");
        Ok(outcome)
    }

    /// Fetch the authenticated user's profile.
    pub async fn current_user(&self) -> Result<User> {
        self.request_json(AUTH_ME, RequestOptions::get()).await
    }

    /// Ask a development server to create its demo account and sample data.
    ///
    /// Sent without credentials and never retried.
    #[instrument(skip(self))]
    pub async fn seed_data(&self) -> Result<MessageResponse> {
        let value = self
            .request_unauthenticated(SEED, RequestOptions::post())
            .await?;
        serde_json::from_value(value).map_err(|e| decode_error(SEED, e))
    }
}
