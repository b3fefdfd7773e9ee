//! Stripe.js v3 Bindings
//!
//! Raw wasm-bindgen handles for the global `Stripe` constructor, the
//! Elements factory and the card element. `Stripe` itself comes from the
//! `<script src="https://js.stripe.com/v3/">` tag in the base template.

use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `Stripe` client instance
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// `stripe.elements()` factory
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// `elements.create('card')` UI component
    #[derive(Debug, Clone)]
    pub type JsCardElement;

    /// `Stripe(publishableKey)`; throws if Stripe.js did not load
    #[wasm_bindgen(catch, js_name = Stripe)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    /// `elements.create(type, options)`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create(this: &JsElements, element_type: &str, options: &JsValue)
    -> Result<JsCardElement, JsValue>;

    /// `card.mount(selector)`
    #[wasm_bindgen(method, catch)]
    pub fn mount(this: &JsCardElement, selector: &str) -> Result<(), JsValue>;

    /// `card.update(options)`
    #[wasm_bindgen(method)]
    pub fn update(this: &JsCardElement, options: &JsValue);

    /// `card.on(event, handler)`
    #[wasm_bindgen(method)]
    pub fn on(this: &JsCardElement, event: &str, handler: &Function);

    /// `stripe.confirmCardPayment(clientSecret, data)` → `Promise<{error} | {paymentIntent}>`
    #[wasm_bindgen(method, js_name = confirmCardPayment)]
    pub fn confirm_card_payment(this: &JsStripe, client_secret: &str, data: &JsValue) -> Promise;
}

/// Best-effort message out of a thrown or rejected JS value
pub fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
