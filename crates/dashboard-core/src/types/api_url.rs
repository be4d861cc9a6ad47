//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated API base URL, e.g. `http://localhost:8000/api`.
///
/// All request paths are appended to this base. The base may carry a path
/// prefix; a trailing slash is dropped on construction so that joining with a
/// `/`-prefixed path never produces `//`.
///
/// # Example
///
/// ```
/// use dashboard_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:8000/api/").unwrap();
/// assert_eq!(api.endpoint("/tasks/"), "http://localhost:8000/api/tasks/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        let mut normalized = url;
        let trimmed = normalized.path().trim_end_matches('/').to_string();
        normalized.set_path(&trimmed);
        normalized.set_query(None);
        normalized.set_fragment(None);

        Ok(Self(normalized))
    }

    /// Returns the full URL for a `/`-prefixed request path.
    pub fn endpoint(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if the API is served over plain HTTP.
    pub fn is_insecure(&self) -> bool {
        self.0.scheme() == "http"
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }
            .into());
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_local_http_url() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(api.host(), Some("localhost"));
        assert!(api.is_insecure());
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("https://dashboard.example.com/api").unwrap();
        assert_eq!(
            api.endpoint("/auth/login/"),
            "https://dashboard.example.com/api/auth/login/"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let api = ApiUrl::new("http://localhost:8000/api/").unwrap();
        assert_eq!(api.endpoint("/tasks/"), "http://localhost:8000/api/tasks/");
    }

    #[test]
    fn root_base_url() {
        let api = ApiUrl::new("http://127.0.0.1:9000").unwrap();
        assert_eq!(
            api.endpoint("/statistics/chart/?period=week"),
            "http://127.0.0.1:9000/statistics/chart/?period=week"
        );
    }

    #[test]
    fn path_without_leading_slash() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(api.endpoint("tasks/"), "http://localhost:8000/api/tasks/");
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/tasks").is_err());
    }

    #[test]
    fn invalid_scheme() {
        assert!(ApiUrl::new("file:///tmp/api").is_err());
        assert!(ApiUrl::new("ftp://example.com/api").is_err());
    }
}
