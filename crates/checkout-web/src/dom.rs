//! DOM Checkout Page
//!
//! `checkout_core::CheckoutPage` over web-sys. Anchors are resolved once;
//! the error region is a Leptos-rendered [`CardErrors`] driven by a signal.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use checkout_core::{CheckoutConfig, CheckoutError, CheckoutPage, Result};

use crate::components::CardErrors;

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| CheckoutError::MissingElement(format!("#{}", id)))
}

/// Value of an input, select or textarea
fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        element.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
    }
}

fn set_display(element: &HtmlElement, display: &str) {
    let style = element.style();
    let result = if display.is_empty() {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", display)
    };
    if let Err(e) = result {
        // Rebound: tracing's macro expansion brings `field::display` into scope.
        let display_value = display;
        tracing::error!(
            error = ?e,
            id = %element.id(),
            display = display_value,
            "Changing element display failed"
        );
    }
}

pub struct DomPage {
    document: Document,
    form: HtmlFormElement,
    form_id: String,
    submit_button: HtmlButtonElement,
    loading_overlay: HtmlElement,
    save_info: HtmlInputElement,
    set_error: WriteSignal<Option<String>>,
}

impl DomPage {
    /// Resolve every anchor named in `config` and mount the error region.
    pub fn attach(document: Document, config: &CheckoutConfig) -> Result<Self> {
        let form = element_by_id::<HtmlFormElement>(&document, &config.payment_form_id)?;
        let submit_button = element_by_id::<HtmlButtonElement>(&document, &config.submit_button_id)?;
        let loading_overlay = element_by_id::<HtmlElement>(&document, &config.loading_overlay_id)?;
        let save_info = element_by_id::<HtmlInputElement>(&document, &config.save_info_id)?;
        let errors = element_by_id::<HtmlElement>(&document, &config.card_errors_id)?;

        let (error, set_error) = signal(None::<String>);
        errors.set_text_content(None);
        leptos::mount::mount_to(errors, move || view! { <CardErrors error=error /> }).forget();

        Ok(Self {
            document,
            form,
            form_id: config.payment_form_id.clone(),
            submit_button,
            loading_overlay,
            save_info,
            set_error,
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }
}

impl CheckoutPage for DomPage {
    fn embedded_text(&self, id: &str) -> Result<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .ok_or_else(|| CheckoutError::MissingElement(format!("#{}", id)))
    }

    fn field_value(&self, name: &str) -> Result<String> {
        let selector = format!("#{} [name=\"{}\"]", self.form_id, name);
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| control_value(&el))
            .ok_or(CheckoutError::MissingElement(selector))
    }

    fn save_info_checked(&self) -> Result<bool> {
        Ok(self.save_info.checked())
    }

    fn show_error(&self, message: &str) {
        self.set_error.set(Some(message.to_string()));
    }

    fn clear_error(&self) {
        self.set_error.set(None);
    }

    fn set_submit_disabled(&self, disabled: bool) {
        self.submit_button.set_disabled(disabled);
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            set_display(&self.form, "none");
            set_display(&self.loading_overlay, "block");
        } else {
            set_display(&self.form, "");
            set_display(&self.loading_overlay, "");
        }
    }

    fn submit_form(&self) {
        // `HTMLFormElement.submit()` does not fire the submit event
        if let Err(e) = self.form.submit() {
            tracing::error!(error = ?e, "Native form submission failed");
        }
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            tracing::error!("No window to reload, checkout left in failed state");
            return;
        };
        if let Err(e) = window.location().reload() {
            tracing::error!(error = ?e, "Page reload failed, checkout left in failed state");
        }
    }
}
