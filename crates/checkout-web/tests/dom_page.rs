//! Browser tests for the web-sys checkout page and the Stripe data builder.
//!
//! Run with `wasm-pack test --headless --firefox crates/checkout-web`.

#[cfg(target_arch = "wasm32")]
mod browser_tests {
    use checkout_core::{CheckoutConfig, CheckoutPage, FormSnapshot};
    use checkout_web::{DomPage, confirm_payment_data};
    use gloo_timers::future::TimeoutFuture;
    use js_sys::{Object, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_test::*;
    use web_sys::{Document, Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    const CHECKOUT_FIXTURE: &str = r#"
        <input name="full_name" value="Outside The Form">
        <form id="payment-form">
            <input type="hidden" name="csrfmiddlewaretoken" value="csrf-token">
            <input name="full_name" value="  Ada Lovelace  ">
            <select name="country">
                <option value="US">United States</option>
                <option value="GB" selected>United Kingdom</option>
            </select>
            <textarea name="street_address2">Flat 2</textarea>
            <div id="card-element"></div>
            <div id="card-errors" role="alert">stale server text</div>
            <input type="checkbox" id="id-save-info" checked>
            <button id="submit-button">Complete Order</button>
        </form>
        <div id="loading-overlay"></div>
    "#;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Replace the body with a fresh checkout form and attach a page to it
    fn attach_fixture() -> DomPage {
        let document = document();
        document.body().unwrap().set_inner_html(CHECKOUT_FIXTURE);
        DomPage::attach(document, &CheckoutConfig::default()).unwrap()
    }

    fn by_id(id: &str) -> Element {
        document().get_element_by_id(id).unwrap()
    }

    fn display_of(id: &str) -> String {
        by_id(id)
            .unchecked_into::<HtmlElement>()
            .style()
            .get_property_value("display")
            .unwrap()
    }

    fn get(target: &JsValue, key: &str) -> JsValue {
        Reflect::get(target, &JsValue::from_str(key)).unwrap()
    }

    /// Let the reactive runtime flush pending render effects
    async fn settle() {
        TimeoutFuture::new(0).await;
    }

    #[wasm_bindgen_test]
    async fn test_attach_clears_error_region() {
        let _page = attach_fixture();
        settle().await;

        let errors = by_id("card-errors");
        assert_eq!(errors.text_content().unwrap_or_default().trim(), "");
        assert!(errors.query_selector(".icon").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_show_error_renders_icon_and_message() {
        let page = attach_fixture();
        page.show_error("Your card was declined.");
        settle().await;

        let errors = by_id("card-errors");
        let icon = errors
            .query_selector(r#"span.icon[role="alert"] > i.fas.fa-times"#)
            .unwrap();
        assert!(icon.is_some());
        assert_eq!(
            errors.text_content().unwrap_or_default().trim(),
            "Your card was declined."
        );
    }

    #[wasm_bindgen_test]
    async fn test_clear_error_empties_region() {
        let page = attach_fixture();
        page.show_error("Your card number is incomplete.");
        settle().await;
        page.clear_error();
        settle().await;

        let errors = by_id("card-errors");
        assert!(errors.query_selector(".icon").unwrap().is_none());
        assert_eq!(errors.text_content().unwrap_or_default().trim(), "");
    }

    #[wasm_bindgen_test]
    async fn test_later_error_replaces_earlier_one() {
        let page = attach_fixture();
        page.show_error("Your card number is incomplete.");
        settle().await;
        page.show_error("Your card was declined.");
        settle().await;

        let errors = by_id("card-errors");
        assert_eq!(errors.query_selector_all(".icon").unwrap().length(), 1);
        assert_eq!(
            errors.text_content().unwrap_or_default().trim(),
            "Your card was declined."
        );
    }

    #[wasm_bindgen_test]
    fn test_set_loading_toggles_form_and_overlay() {
        let page = attach_fixture();

        page.set_loading(true);
        assert_eq!(display_of("payment-form"), "none");
        assert_eq!(display_of("loading-overlay"), "block");

        page.set_loading(false);
        assert_eq!(display_of("payment-form"), "");
        assert_eq!(display_of("loading-overlay"), "");
    }

    #[wasm_bindgen_test]
    fn test_field_value_reads_controls_inside_form() {
        let page = attach_fixture();

        assert_eq!(page.field_value("full_name").unwrap(), "  Ada Lovelace  ");
        assert_eq!(page.field_value("country").unwrap(), "GB");
        assert_eq!(page.field_value("street_address2").unwrap(), "Flat 2");
        assert_eq!(page.field_value("csrfmiddlewaretoken").unwrap(), "csrf-token");
        assert!(page.field_value("postcode").is_err());
    }

    #[wasm_bindgen_test]
    fn test_save_info_and_submit_button() {
        let page = attach_fixture();
        assert!(page.save_info_checked().unwrap());

        page.set_submit_disabled(true);
        assert!(by_id("submit-button").has_attribute("disabled"));
        page.set_submit_disabled(false);
        assert!(!by_id("submit-button").has_attribute("disabled"));
    }

    #[wasm_bindgen_test]
    fn test_attach_reports_missing_anchor() {
        let document = document();
        document
            .body()
            .unwrap()
            .set_inner_html(r#"<form id="payment-form"></form>"#);

        let err = DomPage::attach(document, &CheckoutConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("#submit-button"));
    }

    #[wasm_bindgen_test]
    fn test_confirm_payment_data_shape() {
        let snapshot =
            FormSnapshot::collect(|field| Ok(format!("{} value", field.name())), false).unwrap();
        let card = Object::new();

        let data: JsValue = confirm_payment_data(&card, &snapshot.card_payment_details())
            .unwrap()
            .into();

        let payment_method = get(&data, "payment_method");
        assert!(Object::is(&get(&payment_method, "card"), &card));

        let billing = get(&payment_method, "billing_details");
        assert_eq!(get(&billing, "name").as_string().as_deref(), Some("full_name value"));
        assert_eq!(get(&billing, "email").as_string().as_deref(), Some("email value"));
        let billing_address = get(&billing, "address");
        assert_eq!(
            get(&billing_address, "state").as_string().as_deref(),
            Some("county value")
        );
        assert!(get(&billing_address, "postal_code").is_undefined());

        // Shipping sits beside payment_method, not inside it
        assert!(get(&payment_method, "shipping").is_undefined());
        let shipping = get(&data, "shipping");
        assert!(get(&shipping, "email").is_undefined());
        let shipping_address = get(&shipping, "address");
        assert_eq!(
            get(&shipping_address, "postal_code").as_string().as_deref(),
            Some("postcode value")
        );
        assert_eq!(
            get(&shipping_address, "line1").as_string().as_deref(),
            Some("street_address1 value")
        );
    }
}
