//! Page-Embedded Secrets
//!
//! The checkout template embeds the Stripe publishable key and the payment
//! intent's client secret as JSON string literals (Django's `json_script`).
//! Both are read once at load time and unquoted by dropping the first and
//! last character.

use serde::Serialize;

use crate::error::{CheckoutError, Result};

/// Drop exactly one leading and one trailing character.
pub fn strip_quotes(raw: &str) -> Result<&str> {
    let mut chars = raw.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return Err(CheckoutError::EmbeddedValue(format!(
            "expected a quoted literal, got {} character(s)",
            raw.chars().count()
        )));
    }
    Ok(chars.as_str())
}

/// Stripe publishable key (`pk_...`)
#[derive(Clone, PartialEq, Eq)]
pub struct PublishableKey(String);

impl PublishableKey {
    /// Parse from the embedded, quoted text node
    pub fn from_embedded(raw: &str) -> Result<Self> {
        strip_quotes(raw).map(|key| Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PublishableKey(..)")
    }
}

/// Client secret of the pending payment intent
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Parse from the embedded, quoted text node
    pub fn from_embedded(raw: &str) -> Result<Self> {
        strip_quotes(raw).map(|secret| Self(secret.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}
