//! Pre-flight checks before provider-dependent operations.
//!
//! Validates that required credentials are present before touching the
//! corpus or cache, so operations fail fast with a clear message.

use crate::config::Credentials;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Indexing requires the embedding API key.
    Index,
    /// Asking questions requires embedding and completion credentials.
    Ask,
    /// Search requires the embedding API key.
    Search,
}

/// Run pre-flight checks for the given operation.
///
/// Returns the validated credentials, or an error describing what's missing.
/// Runs before any file I/O so a missing key aborts without side effects.
pub fn check(operation: Operation) -> Result<Credentials> {
    match operation {
        Operation::Index | Operation::Ask | Operation::Search => Credentials::from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvarError;

    #[test]
    fn test_credential_validation_fails_without_key() {
        // Exercise the validation path preflight relies on without touching
        // the process environment.
        let result = Credentials::from_values(None, None);
        assert!(matches!(result, Err(SvarError::Config(_))));
    }
}
