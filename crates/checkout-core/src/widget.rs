//! Payment Widget Abstraction
//!
//! The hosted card field and the SDK call that confirms a card payment.
//! `checkout-web` implements these over Stripe.js; tests use
//! [`crate::mock`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::form::CardPaymentDetails;
use crate::secrets::ClientSecret;

/// A mounted card-input field
pub trait CardField {
    /// Attach the field to the DOM node matching `selector`
    fn mount(&self, selector: &str) -> Result<()>;

    /// Enable or disable user input
    fn set_disabled(&self, disabled: bool);
}

/// Payment SDK client (Strategy pattern)
#[async_trait(?Send)]
pub trait PaymentGateway {
    type Card: CardField;

    /// Create an unmounted card field with the given style
    fn create_card(&self, style: &CardStyle) -> Result<Self::Card>;

    /// Confirm the payment intent identified by `client_secret` with the
    /// card entered in `card`
    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        card: &Self::Card,
        details: &CardPaymentDetails,
    ) -> Result<ConfirmOutcome>;
}

/// Visual style of the card field (Stripe `style` option)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStyle {
    pub base: BaseStyle,
    pub invalid: InvalidStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStyle {
    pub color: String,
    pub font_family: String,
    pub font_smoothing: String,
    pub font_size: String,
    #[serde(rename = "::placeholder")]
    pub placeholder: PlaceholderStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderStyle {
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidStyle {
    pub color: String,
    pub icon_color: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        // Invalid colour matches Bootstrap's `text-danger`
        Self {
            base: BaseStyle {
                color: "#000".into(),
                font_family: "\"Helvetica Neue\", Helvetica, sans-serif".into(),
                font_smoothing: "antialiased".into(),
                font_size: "16px".into(),
                placeholder: PlaceholderStyle {
                    color: "#aab7c4".into(),
                },
            },
            invalid: InvalidStyle {
                color: "#dc3545".into(),
                icon_color: "#dc3545".into(),
            },
        }
    }
}

/// Error carried by a widget event or confirmation result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Card field `change` event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardChange {
    #[serde(default)]
    pub error: Option<WidgetError>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub empty: bool,
}

impl CardChange {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            error: Some(WidgetError {
                message: message.into(),
                code: None,
            }),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub status: String,
}

/// Raw `confirmCardPayment` resolution: `{error}` or `{paymentIntent}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfirmResult {
    #[serde(default)]
    pub error: Option<WidgetError>,
    #[serde(default, rename = "paymentIntent")]
    pub payment_intent: Option<PaymentIntent>,
}

impl ConfirmResult {
    /// An error takes precedence over any payment intent in the same result.
    pub fn into_outcome(self) -> Result<ConfirmOutcome> {
        match (self.error, self.payment_intent) {
            (Some(error), _) => Ok(ConfirmOutcome::Declined {
                message: error.message,
            }),
            (None, Some(intent)) => Ok(ConfirmOutcome::PaymentIntent {
                status: intent.status,
            }),
            (None, None) => Err(CheckoutError::Widget(
                "confirmation returned neither error nor paymentIntent".into(),
            )),
        }
    }
}

/// Outcome of a card payment confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Stripe reported an error (declined card, failed authentication, ...)
    Declined { message: String },

    /// Confirmation finished with a payment intent in `status`
    PaymentIntent { status: String },
}

impl ConfirmOutcome {
    pub fn succeeded() -> Self {
        ConfirmOutcome::PaymentIntent {
            status: "succeeded".into(),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        ConfirmOutcome::Declined {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_style_wire_shape() {
        let json = serde_json::to_value(CardStyle::default()).unwrap();
        assert_eq!(json["base"]["color"], "#000");
        assert_eq!(json["base"]["fontSize"], "16px");
        assert_eq!(json["base"]["::placeholder"]["color"], "#aab7c4");
        assert_eq!(json["invalid"]["iconColor"], "#dc3545");
    }

    #[test]
    fn test_card_change_from_stripe_event() {
        let event: CardChange = serde_json::from_value(serde_json::json!({
            "elementType": "card",
            "empty": false,
            "complete": false,
            "brand": "visa",
            "error": {
                "type": "validation_error",
                "code": "incomplete_number",
                "message": "Your card number is incomplete."
            }
        }))
        .unwrap();

        let error = event.error.unwrap();
        assert_eq!(error.message, "Your card number is incomplete.");
        assert_eq!(error.code.as_deref(), Some("incomplete_number"));
    }

    #[test]
    fn test_confirm_result_outcomes() {
        let declined: ConfirmResult = serde_json::from_value(serde_json::json!({
            "error": { "type": "card_error", "message": "Your card was declined." }
        }))
        .unwrap();
        assert_eq!(
            declined.into_outcome().unwrap(),
            ConfirmOutcome::declined("Your card was declined.")
        );

        let succeeded: ConfirmResult = serde_json::from_value(serde_json::json!({
            "paymentIntent": { "id": "pi_1", "amount": 1999, "status": "succeeded" }
        }))
        .unwrap();
        assert_eq!(succeeded.into_outcome().unwrap(), ConfirmOutcome::succeeded());
    }

    #[test]
    fn test_empty_confirm_result_is_error() {
        assert!(ConfirmResult::default().into_outcome().is_err());
    }
}
