//! Credential handling for the Canvas API.
//!
//! Canvas authenticates every call with a personal or OAuth access token
//! sent as a bearer token:
//!
//! ```
//! use canvasapi::Credential;
//!
//! let credential = Credential::new("7~abcdef");
//! assert_eq!(format!("{:?}", credential), "Credential([REDACTED])");
//! ```

use std::fmt;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// An opaque bearer token.
///
/// The token is fixed at construction and is never printed.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
}

impl Credential {
    /// Wrap an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    /// Build the `Authorization` header value for this token.
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
