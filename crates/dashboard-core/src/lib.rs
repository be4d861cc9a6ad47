//! dashboard-core - Core types and traits for the smart dashboard API client.

pub mod credentials;
pub mod error;
pub mod memory;
pub mod models;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, Registration};
pub use error::Error;
pub use memory::MemoryTokenStore;
pub use tokens::{ACCESS_TOKEN_KEY, AccessToken, REFRESH_TOKEN_KEY, RefreshToken, TokenPair};
pub use traits::TokenStore;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
