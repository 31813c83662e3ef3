//! Durable storage for the session token.

use crate::error::Result;

/// Key-value slot holding the bearer token between runs.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token could not be persisted.
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store could not be updated.
    fn clear(&self) -> Result<()>;
}
