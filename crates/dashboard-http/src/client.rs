//! The authenticated API client.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use dashboard_core::error::{Error, InvalidInputError, ProtocolError, RequestError, TransportError};
use dashboard_core::{
    ACCESS_TOKEN_KEY, AccessToken, ApiUrl, REFRESH_TOKEN_KEY, RefreshToken, Result, TokenStore,
};

use crate::config::ClientConfig;
use crate::endpoints::{AUTH_TOKEN_REFRESH, RefreshRequest, RefreshResponse};
use crate::request::RequestOptions;

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let transport = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(transport)
}

pub(crate) fn decode_error(path: &str, err: impl std::fmt::Display) -> Error {
    Error::Protocol(ProtocolError::Decode {
        path: path.to_string(),
        message: err.to_string(),
    })
}

/// Result of a token refresh attempt.
///
/// Refreshing never fails the caller; the outcome says whether a new access
/// token is now in place and, if not, why.
#[derive(Debug)]
#[must_use]
pub enum RefreshOutcome {
    /// A new access token was stored.
    Refreshed,
    /// No refresh token was stored, so no request was made.
    NoRefreshToken,
    /// The server refused the refresh token.
    Rejected { status: u16 },
    /// The refresh could not be completed (network, decode or storage).
    Failed(Error),
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, RefreshOutcome::Refreshed)
    }
}

/// An access token paired with its `Authorization` header value.
///
/// Built once when a token enters the client, so a held token can always be
/// sent.
#[derive(Clone)]
struct Bearer {
    token: AccessToken,
    header: HeaderValue,
}

impl Bearer {
    fn new(token: AccessToken) -> Result<Self> {
        let mut header = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(
            |e| InvalidInputError::Header {
                name: AUTHORIZATION.to_string(),
                reason: format!("access token is not a valid header value: {}", e),
            },
        )?;
        header.set_sensitive(true);
        Ok(Self { token, header })
    }
}

/// A client for the dashboard REST API.
///
/// The client owns the credential pair: the access token is cached in memory
/// and in the [`TokenStore`], the refresh token lives only in the store.
/// Every call goes through [`ApiClient::request`], which retries once after a
/// successful refresh when the server answers 401.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and are safe to share
/// across tasks. Concurrent 401s are coalesced into a single refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base: ApiUrl,
    store: Arc<dyn TokenStore>,
    access_token: RwLock<Option<Bearer>>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Create a client, restoring any access token persisted in `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the store
    /// cannot be read, or the stored access token cannot be sent as a header.
    pub async fn new(config: ClientConfig, store: impl TokenStore + 'static) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(transport_error)?;

        let store: Arc<dyn TokenStore> = Arc::new(store);
        let access_token = store
            .get(ACCESS_TOKEN_KEY)
            .await?
            .map(|token| Bearer::new(AccessToken::new(token)))
            .transpose()?;

        debug!(
            base = %config.base_url,
            restored = access_token.is_some(),
            "API client created"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base: config.base_url,
                store,
                access_token: RwLock::new(access_token),
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base
    }

    // ========================================================================
    // Credentials
    // ========================================================================

    fn current_token(&self) -> Option<Bearer> {
        self.inner
            .access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_token(&self, token: Option<Bearer>) {
        *self
            .inner
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn headers_for(bearer: Option<&Bearer>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(bearer) = bearer {
            headers.insert(AUTHORIZATION, bearer.header.clone());
        }

        headers
    }

    /// Default headers for the current state: JSON content type plus the
    /// bearer token when one is held.
    pub fn build_headers(&self) -> HeaderMap {
        Self::headers_for(self.current_token().as_ref())
    }

    /// True if an access token is held. Validity and expiry are not checked.
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// True if a refresh token is persisted.
    pub async fn has_refresh_token(&self) -> Result<bool> {
        Ok(self.inner.store.get(REFRESH_TOKEN_KEY).await?.is_some())
    }

    /// Replace the in-memory access token and persist both tokens.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Header`] without touching any state if
    /// `access` cannot be sent as a header value, or a storage error.
    #[instrument(skip_all)]
    pub async fn set_credentials(&self, access: AccessToken, refresh: RefreshToken) -> Result<()> {
        self.replace_token(Some(Bearer::new(access.clone())?));
        self.inner
            .store
            .set(ACCESS_TOKEN_KEY, access.as_str())
            .await?;
        self.inner
            .store
            .set(REFRESH_TOKEN_KEY, refresh.as_str())
            .await?;
        debug!("Credentials stored");
        Ok(())
    }

    /// Forget the access token and remove both persisted tokens.
    ///
    /// Safe to call when no credentials exist.
    #[instrument(skip_all)]
    pub async fn clear_credentials(&self) -> Result<()> {
        self.replace_token(None);
        self.inner.store.remove(ACCESS_TOKEN_KEY).await?;
        self.inner.store.remove(REFRESH_TOKEN_KEY).await?;
        debug!("Credentials cleared");
        Ok(())
    }

    // ========================================================================
    // Token Refresh
    // ========================================================================

    /// Exchange the persisted refresh token for a new access token.
    ///
    /// Never returns an error; failures are logged and reported through the
    /// outcome. Without a stored refresh token no request is made.
    pub async fn refresh_access_token(&self) -> RefreshOutcome {
        let _guard = self.inner.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh after a 401 that was produced while sending `stale`.
    ///
    /// If another task replaced the token while this one waited for the
    /// lock, the new token is used without a second refresh.
    async fn refresh_after_unauthorized(&self, stale: Option<&AccessToken>) -> bool {
        let _guard = self.inner.refresh_lock.lock().await;

        if let Some(current) = self.current_token()
            && stale != Some(&current.token)
        {
            debug!("Access token already refreshed by a concurrent request");
            return true;
        }

        self.refresh_locked().await.is_refreshed()
    }

    #[instrument(skip(self), fields(base = %self.inner.base))]
    async fn refresh_locked(&self) -> RefreshOutcome {
        let refresh = match self.inner.store.get(REFRESH_TOKEN_KEY).await {
            Ok(Some(token)) => RefreshToken::new(token),
            Ok(None) => {
                debug!("No refresh token stored");
                return RefreshOutcome::NoRefreshToken;
            }
            Err(err) => {
                warn!(error = %err, "Failed to read refresh token");
                return RefreshOutcome::Failed(err);
            }
        };

        info!("Refreshing access token");

        let url = self.inner.base.endpoint(AUTH_TOKEN_REFRESH);
        let response = match self
            .inner
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh: Some(refresh.as_str()),
            })
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = transport_error(err);
                warn!(error = %err, "Token refresh failed");
                return RefreshOutcome::Failed(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Token refresh rejected");
            return RefreshOutcome::Rejected {
                status: status.as_u16(),
            };
        }

        let body = match response.json::<RefreshResponse>().await {
            Ok(body) => body,
            Err(err) => {
                let err = decode_error(AUTH_TOKEN_REFRESH, err);
                warn!(error = %err, "Token refresh returned an unexpected body");
                return RefreshOutcome::Failed(err);
            }
        };

        if let Err(err) = self.set_credentials(body.access, refresh).await {
            warn!(error = %err, "Failed to store refreshed access token");
            return RefreshOutcome::Failed(err);
        }

        debug!("Access token refreshed");
        RefreshOutcome::Refreshed
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Send a request to `path` (relative to the base URL) and return the
    /// parsed JSON body.
    ///
    /// A 401 response triggers one refresh; if it succeeds the same request
    /// is sent once more with fresh headers. An empty success body is
    /// returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] for a non-success final response, carrying the
    ///   body's `detail` message
    /// - [`Error::Transport`] if the request could not be sent
    /// - [`Error::Protocol`] if a success body is not valid JSON
    #[instrument(skip(self, options), fields(method = %options.method()))]
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = self.inner.base.endpoint(path);

        let bearer = self.current_token();
        let mut response = self.send(&url, &options, bearer.as_ref(), false).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Unauthorized response, attempting token refresh");
            if self
                .refresh_after_unauthorized(bearer.as_ref().map(|b| &b.token))
                .await
            {
                let bearer = self.current_token();
                debug!("Retrying request with refreshed token");
                response = self.send(&url, &options, bearer.as_ref(), true).await?;
            }
        }

        Self::read_body(path, response).await
    }

    /// Like [`request`](Self::request), decoding the body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        serde_json::from_value(value).map_err(|e| decode_error(path, e))
    }

    /// Send a request without credentials and without the refresh/retry path.
    pub(crate) async fn request_unauthenticated(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        let url = self.inner.base.endpoint(path);
        let response = self.send(&url, &options, None, false).await?;
        Self::read_body(path, response).await
    }

    pub(crate) fn store(&self) -> &dyn TokenStore {
        self.inner.store.as_ref()
    }

    /// Caller headers replace the defaults of the same name, except that a
    /// retry after refresh always carries the client's own bearer token.
    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        bearer: Option<&Bearer>,
        retry: bool,
    ) -> Result<Response> {
        let mut headers = Self::headers_for(bearer);
        let caller: Vec<_> = options
            .headers()
            .iter()
            .filter(|(name, _)| !(retry && **name == AUTHORIZATION))
            .collect();
        for (name, _) in &caller {
            headers.remove(*name);
        }
        for (name, value) in caller {
            headers.append(name, value.clone());
        }

        trace!(%url, authorized = bearer.is_some(), retry, "Sending request");

        let mut builder = self
            .inner
            .http
            .request(options.method().clone(), url)
            .headers(headers);
        if let Some(body) = options.json_body() {
            builder = builder.json(body);
        }

        builder.send().await.map_err(transport_error)
    }

    async fn read_body(path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        trace!(status = %status, "Response received");

        let bytes = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = RequestError::from_body(status.as_u16(), &bytes);
            debug!(status = status.as_u16(), error = %err, "API request failed");
            return Err(err.into());
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| decode_error(path, e))
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .field("authenticated", &self.is_authenticated())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::MemoryTokenStore;

    async fn client_with(store: MemoryTokenStore) -> ApiClient {
        let config = ClientConfig::new(ApiUrl::new("http://localhost:8000/api").unwrap());
        ApiClient::new(config, store).await.unwrap()
    }

    #[tokio::test]
    async fn headers_without_token() {
        let client = client_with(MemoryTokenStore::new()).await;
        let headers = client.build_headers();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn headers_with_restored_token() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "abc").await.unwrap();

        let client = client_with(store).await;
        let headers = client.build_headers();

        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn set_and_clear_credentials() {
        let store = MemoryTokenStore::new();
        let client = client_with(store.clone()).await;

        client
            .set_credentials(AccessToken::new("a"), RefreshToken::new("r"))
            .await
            .unwrap();
        assert!(client.is_authenticated());
        assert!(client.has_refresh_token().await.unwrap());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("a"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("r"));

        client.clear_credentials().await.unwrap();
        client.clear_credentials().await.unwrap();
        assert!(!client.is_authenticated());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn debug_hides_tokens() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "secret-token").await.unwrap();
        let client = client_with(store).await;

        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("authenticated: true"));
    }

    #[tokio::test]
    async fn restoring_unsendable_token_fails() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "bad\ntoken").await.unwrap();

        let config = ClientConfig::new(ApiUrl::new("http://localhost:8000/api").unwrap());
        let err = ApiClient::new(config, store).await.unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Header { .. })
        ));
    }

    #[tokio::test]
    async fn set_credentials_rejects_unsendable_token() {
        let store = MemoryTokenStore::new();
        let client = client_with(store.clone()).await;
        client
            .set_credentials(AccessToken::new("good"), RefreshToken::new("r"))
            .await
            .unwrap();

        let err = client
            .set_credentials(AccessToken::new("bad\ntoken"), RefreshToken::new("r2"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Header { .. })
        ));
        assert_eq!(client.build_headers().get(AUTHORIZATION).unwrap(), "Bearer good");
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("good"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("r"));
    }

    #[test]
    fn refresh_outcome_view() {
        assert!(RefreshOutcome::Refreshed.is_refreshed());
        assert!(!RefreshOutcome::NoRefreshToken.is_refreshed());
        assert!(!RefreshOutcome::Rejected { status: 401 }.is_refreshed());
    }
}
