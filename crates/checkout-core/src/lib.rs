//! # checkout-core
//!
//! Platform-agnostic checkout form controller for an embedded Stripe card
//! field (Stripe Elements).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    CheckoutController                         │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐  │
//! │  │ CheckoutPage │  │ PaymentGateway │  │ CheckoutBackend  │  │
//! │  │    (DOM)     │  │  (Stripe.js)   │  │ (cache endpoint) │  │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘  │
//! │                  SubmitState machine                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submit handshake
//!
//! 1. Disable the card field and submit button, show the loading overlay
//! 2. POST csrf token, client secret and save-info flag to the backend
//! 3. On 2xx, confirm the card payment with billing/shipping details
//! 4. `succeeded` submits the form natively; an error is shown inline and
//!    the controls come back; a backend failure reloads the page
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutConfig, CheckoutController};
//!
//! let controller = CheckoutController::initialize(config, page, backend, |key| {
//!     StripeGateway::connect(key)
//! })?;
//!
//! controller.on_card_change(&event);
//! let state = controller.submit().await?;
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod mock;
pub mod page;
pub mod secrets;
pub mod state;
pub mod widget;

pub use backend::{CheckoutBackend, CACHE_CHECKOUT_DATA_PATH};
pub use config::CheckoutConfig;
pub use controller::CheckoutController;
pub use error::{CheckoutError, Result};
pub use form::{
    BillingAddress, BillingDetails, CacheCheckoutData, CardPaymentDetails, FormField,
    FormSnapshot, ShippingAddress, ShippingDetails,
};
pub use page::CheckoutPage;
pub use secrets::{strip_quotes, ClientSecret, PublishableKey};
pub use state::SubmitState;
pub use widget::{
    CardChange, CardField, CardStyle, ConfirmOutcome, ConfirmResult, PaymentGateway, WidgetError,
};
