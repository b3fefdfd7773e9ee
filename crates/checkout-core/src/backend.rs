//! Checkout Backend
//!
//! The server route that stashes form data the payment intent cannot carry
//! (save-info flag, the user) before the card is confirmed.

use async_trait::async_trait;

use crate::error::Result;
use crate::form::CacheCheckoutData;

/// Default route of the caching endpoint
pub const CACHE_CHECKOUT_DATA_PATH: &str = "/checkout/cache_checkout_data/";

#[async_trait(?Send)]
pub trait CheckoutBackend {
    /// POST the data; `Ok` only for a 2xx response.
    async fn cache_checkout_data(&self, data: &CacheCheckoutData) -> Result<()>;
}
