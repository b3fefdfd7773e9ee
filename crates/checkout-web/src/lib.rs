//! checkout-web
//!
//! WASM side of the checkout page: mounts the Stripe card element and binds
//! the field-change and form-submit listeners to a
//! [`checkout_core::CheckoutController`].
//!
//! Load the bundle after the payment form (e.g. in the template's
//! `postloadjs` block) and after `https://js.stripe.com/v3/`.

mod api;
mod components;
mod dom;
mod gateway;
mod stripe;

pub use api::HttpCheckoutBackend;
pub use dom::DomPage;
pub use gateway::{StripeCard, StripeGateway, confirm_payment_data};

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event};

use checkout_core::{
    CardChange, CheckoutConfig, CheckoutController, CheckoutError, CheckoutPage, Result,
};

/// Optional `<script type="application/json">` with config overrides
pub const CONFIG_ELEMENT_ID: &str = "checkout-config";

type Controller = CheckoutController<DomPage, StripeGateway, HttpCheckoutBackend>;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );

    if let Err(e) = wire() {
        tracing::error!(error = %e, "Checkout wiring failed, card payments unavailable");
    }
}

fn load_config(document: &Document) -> Result<CheckoutConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) => CheckoutConfig::from_json(&json),
        None => Ok(CheckoutConfig::default()),
    }
}

fn wire() -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CheckoutError::MissingElement("document".into()))?;

    let config = load_config(&document)?;
    let page = DomPage::attach(document, &config)?;
    let backend =
        HttpCheckoutBackend::for_current_origin(&config.cache_endpoint, config.cache_timeout())?;

    let controller = Rc::new(CheckoutController::initialize(
        config,
        page,
        backend,
        StripeGateway::connect,
    )?);

    bind_card_change(&controller);
    bind_submit(&controller)?;
    tracing::info!("Checkout form wired");
    Ok(())
}

fn bind_card_change(controller: &Rc<Controller>) {
    let handle = Rc::clone(controller);
    let on_change = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match serde_wasm_bindgen::from_value::<CardChange>(event) {
            Ok(change) => handle.on_card_change(&change),
            Err(e) => tracing::warn!(error = %e, "Unreadable card change event"),
        }
    });

    controller.card().on_change(on_change.as_ref().unchecked_ref());
    // Listeners live as long as the page
    on_change.forget();
}

fn bind_submit(controller: &Rc<Controller>) -> Result<()> {
    let handle = Rc::clone(controller);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let controller = Rc::clone(&handle);
        wasm_bindgen_futures::spawn_local(async move {
            match controller.submit().await {
                Ok(state) if state.is_terminal() => {
                    tracing::info!(state = %state, "Submit handshake finished");
                }
                Ok(state) => {
                    tracing::debug!(state = %state, "Submit handshake settled, form still open");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Submit handshake failed");
                    controller.page().show_error(e.user_message());
                }
            }
        });
    });

    controller
        .page()
        .form()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(|e| CheckoutError::Dom(stripe::js_error_message(&e)))?;
    on_submit.forget();
    Ok(())
}
