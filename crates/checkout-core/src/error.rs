//! Checkout Error Types

use std::time::Duration;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// A DOM anchor or form field the controller needs is absent
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Page-embedded value could not be unquoted
    #[error("Embedded value invalid: {0}")]
    EmbeddedValue(String),

    /// Browser DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Payment widget (Stripe.js) failure
    #[error("Payment widget error: {0}")]
    Widget(String),

    /// Backend caching endpoint rejected the request or was unreachable
    #[error("Backend error ({}): {message}", describe_status(.status))]
    Backend { status: Option<u16>, message: String },

    /// Request exceeded its configured time limit
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Submit state machine asked to take an edge it does not have
    #[error("Invalid submit transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |code| code.to_string())
}

impl CheckoutError {
    /// Whether the failure happened before the server acknowledged the request
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CheckoutError::Timeout(_) | CheckoutError::Backend { status: None, .. }
        )
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            CheckoutError::Widget(_) => "Payment processing failed. Please try again.",
            CheckoutError::Backend { .. } | CheckoutError::Timeout(_) => {
                "We could not reach the checkout service. Please try again."
            }
            CheckoutError::MissingElement(_) => "Please fill in all required fields.",
            _ => "An error occurred processing your payment.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display_with_and_without_status() {
        let rejected = CheckoutError::Backend {
            status: Some(400),
            message: "bad request".into(),
        };
        assert_eq!(rejected.to_string(), "Backend error (400): bad request");

        let unreachable = CheckoutError::Backend {
            status: None,
            message: "network".into(),
        };
        assert_eq!(unreachable.to_string(), "Backend error (no response): network");
        assert!(unreachable.is_transport());
        assert!(!rejected.is_transport());
    }

    #[test]
    fn test_user_message() {
        let err = CheckoutError::Widget("promise rejected".into());
        assert_eq!(err.user_message(), "Payment processing failed. Please try again.");
    }

    #[test]
    fn test_timeout_is_transport_failure() {
        let err = CheckoutError::Timeout(Duration::from_secs(30));
        assert!(err.is_transport());
        assert_eq!(
            err.user_message(),
            "We could not reach the checkout service. Please try again."
        );
        assert!(!CheckoutError::Widget("declined".into()).is_transport());
    }
}
