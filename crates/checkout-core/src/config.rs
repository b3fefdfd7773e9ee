//! Checkout Configuration
//!
//! Every DOM identifier, the caching route, the card style and the request
//! timeout. Defaults match the checkout template; a JSON object can
//! override any subset of fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::CACHE_CHECKOUT_DATA_PATH;
use crate::error::{CheckoutError, Result};
use crate::widget::CardStyle;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Element whose text is the quoted publishable key
    pub public_key_id: String,

    /// Element whose text is the quoted client secret
    pub client_secret_id: String,

    /// Card field mount point
    pub card_element_id: String,

    /// Error region
    pub card_errors_id: String,

    pub payment_form_id: String,
    pub submit_button_id: String,
    pub loading_overlay_id: String,
    pub save_info_id: String,

    /// Path of the caching endpoint, resolved against the page origin
    pub cache_endpoint: String,

    /// Caching request limit in milliseconds; `0` disables it
    pub cache_timeout_ms: u64,

    /// Payment intent status that lets the form submit
    pub success_status: String,

    pub card_style: CardStyle,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            public_key_id: "id_stripe_public_key".into(),
            client_secret_id: "id_client_secret".into(),
            card_element_id: "card-element".into(),
            card_errors_id: "card-errors".into(),
            payment_form_id: "payment-form".into(),
            submit_button_id: "submit-button".into(),
            loading_overlay_id: "loading-overlay".into(),
            save_info_id: "id-save-info".into(),
            cache_endpoint: CACHE_CHECKOUT_DATA_PATH.into(),
            cache_timeout_ms: 30_000,
            success_status: "succeeded".into(),
            card_style: CardStyle::default(),
        }
    }
}

impl CheckoutConfig {
    /// Defaults overlaid with the fields present in `json`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("public_key_id", &self.public_key_id),
            ("client_secret_id", &self.client_secret_id),
            ("card_element_id", &self.card_element_id),
            ("card_errors_id", &self.card_errors_id),
            ("payment_form_id", &self.payment_form_id),
            ("submit_button_id", &self.submit_button_id),
            ("loading_overlay_id", &self.loading_overlay_id),
            ("save_info_id", &self.save_info_id),
            ("cache_endpoint", &self.cache_endpoint),
            ("success_status", &self.success_status),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::Config(format!("{} must not be empty", name)));
            }
        }

        if !self.cache_endpoint.starts_with('/') {
            return Err(CheckoutError::Config(format!(
                "cache_endpoint must be an absolute path, got {:?}",
                self.cache_endpoint
            )));
        }

        Ok(())
    }

    /// Selector the card field mounts to
    pub fn card_selector(&self) -> String {
        format!("#{}", self.card_element_id)
    }

    pub fn cache_timeout(&self) -> Option<Duration> {
        (self.cache_timeout_ms > 0).then(|| Duration::from_millis(self.cache_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_template() {
        let config = CheckoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.card_selector(), "#card-element");
        assert_eq!(config.cache_endpoint, "/checkout/cache_checkout_data/");
        assert_eq!(config.cache_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_override() {
        let config =
            CheckoutConfig::from_json(r#"{"cache_timeout_ms": 0, "card_errors_id": "errs"}"#)
                .unwrap();
        assert_eq!(config.cache_timeout(), None);
        assert_eq!(config.card_errors_id, "errs");
        assert_eq!(config.payment_form_id, "payment-form");
    }

    #[test]
    fn test_rejects_empty_selector() {
        let err = CheckoutConfig::from_json(r#"{"submit_button_id": " "}"#).unwrap_err();
        assert!(matches!(err, CheckoutError::Config(_)));
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let err =
            CheckoutConfig::from_json(r#"{"cache_endpoint": "checkout/cache/"}"#).unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CheckoutConfig::from_json("{not json"),
            Err(CheckoutError::Json(_))
        ));
    }
}
