//! Page Abstraction
//!
//! The DOM surface the controller reads from and writes to.

use crate::error::Result;

/// Server-rendered checkout page
///
/// Element identifiers come from [`crate::CheckoutConfig`]; implementations
/// resolve them once at construction.
pub trait CheckoutPage {
    /// Text content of the element with `id`
    fn embedded_text(&self, id: &str) -> Result<String>;

    /// Current value of the form input named `name`
    fn field_value(&self, name: &str) -> Result<String>;

    /// Checked state of the "save info" control
    fn save_info_checked(&self) -> Result<bool>;

    /// Replace the error region with icon + `message`
    fn show_error(&self, message: &str);

    /// Empty the error region
    fn clear_error(&self);

    fn set_submit_disabled(&self, disabled: bool);

    /// `true` hides the form and shows the loading overlay; `false` reverts
    fn set_loading(&self, loading: bool);

    /// Native form submission, bypassing the submit listener
    fn submit_form(&self);

    /// Full page reload
    fn reload(&self);
}
