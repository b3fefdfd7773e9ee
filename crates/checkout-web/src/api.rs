//! Checkout Backend Client

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;

use checkout_core::{CacheCheckoutData, CheckoutBackend, CheckoutError, Result};

/// Join the page origin and an absolute path
pub fn endpoint_url(origin: &str, path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), path)
}

/// `reqwest` client for `POST /checkout/cache_checkout_data/`
pub struct HttpCheckoutBackend {
    client: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpCheckoutBackend {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    /// Endpoint `path` on the current page's origin
    pub fn for_current_origin(path: &str, timeout: Option<Duration>) -> Result<Self> {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .ok_or_else(|| CheckoutError::MissingElement("window.location.origin".into()))?;
        Ok(Self::new(endpoint_url(&origin, path), timeout))
    }
}

/// Race `request` against a browser timer.
async fn with_timeout<F: Future>(request: F, limit: Duration) -> Result<F::Output> {
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let request = Box::pin(request);
    let timer = Box::pin(TimeoutFuture::new(millis));

    match future::select(request, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(CheckoutError::Timeout(limit)),
    }
}

#[async_trait(?Send)]
impl CheckoutBackend for HttpCheckoutBackend {
    async fn cache_checkout_data(&self, data: &CacheCheckoutData) -> Result<()> {
        // Form-encoded so Django's CSRF middleware sees `csrfmiddlewaretoken`
        let request = self.client.post(&self.url).form(data).send();

        let response = match self.timeout {
            Some(limit) => with_timeout(request, limit).await?,
            None => request.await,
        }
        .map_err(|e| CheckoutError::Backend {
            status: None,
            message: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CheckoutError::Backend {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("https://shop.example.com", "/checkout/cache_checkout_data/"),
            "https://shop.example.com/checkout/cache_checkout_data/"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/", "/checkout/cache_checkout_data/"),
            "http://localhost:8000/checkout/cache_checkout_data/"
        );
    }
}
