//! Credential storage trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

/// A durable key/value store for credentials.
///
/// The client keeps its access and refresh tokens under the keys
/// [`ACCESS_TOKEN_KEY`](crate::ACCESS_TOKEN_KEY) and
/// [`REFRESH_TOKEN_KEY`](crate::REFRESH_TOKEN_KEY). Values written here must
/// survive for as long as the caller expects a session to survive; a file
/// store survives process restarts, a memory store does not.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read a value, returning `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T> TokenStore for Arc<T>
where
    T: TokenStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}
