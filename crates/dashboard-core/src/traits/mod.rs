//! Core traits for pluggable client behavior.

mod token_store;

pub use token_store::TokenStore;
