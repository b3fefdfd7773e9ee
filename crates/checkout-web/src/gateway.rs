//! Stripe.js Payment Gateway
//!
//! `checkout_core::PaymentGateway` over the raw bindings in [`crate::stripe`].

use async_trait::async_trait;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use checkout_core::{
    CardField, CardPaymentDetails, CardStyle, CheckoutError, ClientSecret, ConfirmOutcome,
    ConfirmResult, PaymentGateway, PublishableKey, Result,
};

use crate::stripe::{JsCardElement, JsElements, JsStripe, js_error_message, new_stripe};

fn widget_error(value: JsValue) -> CheckoutError {
    CheckoutError::Widget(js_error_message(&value))
}

/// Plain JS object from a serde value (maps become objects, not `Map`s)
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| CheckoutError::Widget(e.to_string()))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(widget_error)
}

/// `confirmCardPayment` data: `{payment_method: {card, billing_details}, shipping}`
pub fn confirm_payment_data(card: &JsValue, details: &CardPaymentDetails) -> Result<Object> {
    let payment_method = Object::new();
    set(&payment_method, "card", card)?;
    set(&payment_method, "billing_details", &to_js(&details.billing_details)?)?;

    let data = Object::new();
    set(&data, "payment_method", &payment_method)?;
    set(&data, "shipping", &to_js(&details.shipping)?)?;
    Ok(data)
}

#[derive(Serialize)]
struct CardOptions<'a> {
    style: &'a CardStyle,
}

/// Stripe client plus its Elements factory
pub struct StripeGateway {
    stripe: JsStripe,
    elements: JsElements,
}

impl StripeGateway {
    /// `Stripe(key).elements()`
    pub fn connect(publishable_key: &PublishableKey) -> Result<Self> {
        let stripe = new_stripe(publishable_key.as_str()).map_err(widget_error)?;
        let elements = stripe.elements().map_err(widget_error)?;
        Ok(Self { stripe, elements })
    }
}

/// Mounted Stripe card element
pub struct StripeCard {
    element: JsCardElement,
}

impl StripeCard {
    /// Register a `change` listener
    pub fn on_change(&self, handler: &Function) {
        self.element.on("change", handler);
    }
}

impl CardField for StripeCard {
    fn mount(&self, selector: &str) -> Result<()> {
        self.element.mount(selector).map_err(widget_error)
    }

    fn set_disabled(&self, disabled: bool) {
        let options = Object::new();
        if set(&options, "disabled", &JsValue::from_bool(disabled)).is_ok() {
            self.element.update(&options);
        }
    }
}

#[async_trait(?Send)]
impl PaymentGateway for StripeGateway {
    type Card = StripeCard;

    fn create_card(&self, style: &CardStyle) -> Result<StripeCard> {
        let options = to_js(&CardOptions { style })?;
        let element = self.elements.create("card", &options).map_err(widget_error)?;
        Ok(StripeCard { element })
    }

    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        card: &StripeCard,
        details: &CardPaymentDetails,
    ) -> Result<ConfirmOutcome> {
        let data = confirm_payment_data(&card.element, details)?;
        let promise = self.stripe.confirm_card_payment(client_secret.as_str(), &data);
        let result = JsFuture::from(promise).await.map_err(widget_error)?;

        let result: ConfirmResult = serde_wasm_bindgen::from_value(result)
            .map_err(|e| CheckoutError::Widget(e.to_string()))?;
        result.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_options_wrap_style() {
        let style = CardStyle::default();
        let json = serde_json::to_value(CardOptions { style: &style }).unwrap();
        assert_eq!(json["style"]["base"]["fontSmoothing"], "antialiased");
        assert_eq!(json["style"]["invalid"]["color"], "#dc3545");
    }
}
