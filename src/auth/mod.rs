//! Authentication module for the Chaster client.
//!
//! Requests are authenticated with a bearer token: either an OAuth2 access
//! token or a developer token issued by Chaster.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::ChasterError;

/// Authentication provider trait.
///
/// Implementations of this trait provide authentication credentials
/// for API requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), ChasterError>;
}

/// Bearer token authentication provider.
///
/// The token is immutable for the lifetime of the provider.
pub struct BearerTokenAuth {
    token: SecretString,
}

impl BearerTokenAuth {
    /// Creates a new bearer token provider.
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Creates from a string token.
    pub fn from_string(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Gets a hint of the token for debugging (last 4 characters).
    pub fn token_hint(&self) -> String {
        token_hint(self.token.expose_secret())
    }
}

impl AuthProvider for BearerTokenAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token.expose_secret()),
        );
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), ChasterError> {
        let token = self.token.expose_secret();

        if token.trim().is_empty() {
            return Err(ChasterError::configuration(
                "Access token or developer token is required",
            ));
        }

        if token.chars().any(char::is_whitespace) {
            return Err(ChasterError::configuration(
                "Access token must not contain whitespace",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("token", &"[REDACTED]")
            .field("token_hint", &self.token_hint())
            .finish()
    }
}

/// Returns the last 4 characters of a token, or `****` for short tokens.
pub(crate) fn token_hint(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_auth_apply() {
        let auth = BearerTokenAuth::from_string("dev_token_12345");
        let mut headers = HashMap::new();

        auth.apply_auth(&mut headers);

        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer dev_token_12345".to_string())
        );
    }

    #[test]
    fn test_bearer_auth_scheme() {
        let auth = BearerTokenAuth::from_string("dev_token");
        assert_eq!(auth.scheme(), "Bearer");
    }

    #[test]
    fn test_bearer_auth_validate() {
        assert!(BearerTokenAuth::from_string("dev_token_12345").validate().is_ok());
        assert!(BearerTokenAuth::from_string("").validate().is_err());
        assert!(BearerTokenAuth::from_string("   ").validate().is_err());
        assert!(BearerTokenAuth::from_string("two words").validate().is_err());
    }

    #[test]
    fn test_token_hint() {
        assert_eq!(BearerTokenAuth::from_string("dev_token_12345").token_hint(), "...2345");
        assert_eq!(BearerTokenAuth::from_string("abc").token_hint(), "****");
    }

    #[test]
    fn test_debug_redacts_token() {
        let auth = BearerTokenAuth::from_string("dev_secret_token");
        let debug_str = format!("{:?}", auth);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("dev_secret_token"));
    }
}
