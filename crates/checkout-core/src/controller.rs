//! Checkout Form Controller
//!
//! Owns the payment gateway, the mounted card field and the client secret
//! for the lifetime of the page. Built once on page-ready; there is no
//! teardown, navigation ends it.

use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::backend::CheckoutBackend;
use crate::config::CheckoutConfig;
use crate::error::Result;
use crate::form::{FormField, FormSnapshot};
use crate::page::CheckoutPage;
use crate::secrets::{ClientSecret, PublishableKey};
use crate::state::SubmitState;
use crate::widget::{CardChange, CardField, ConfirmOutcome, PaymentGateway};

pub struct CheckoutController<P, G, B>
where
    P: CheckoutPage,
    G: PaymentGateway,
    B: CheckoutBackend,
{
    config: CheckoutConfig,
    page: P,
    gateway: G,
    backend: B,
    card: G::Card,
    client_secret: ClientSecret,
    state: RefCell<SubmitState>,
}

impl<P, G, B> CheckoutController<P, G, B>
where
    P: CheckoutPage,
    G: PaymentGateway,
    B: CheckoutBackend,
{
    /// Read the embedded secrets, connect the gateway, create and mount the
    /// card field.
    pub fn initialize<F>(config: CheckoutConfig, page: P, backend: B, connect: F) -> Result<Self>
    where
        F: FnOnce(&PublishableKey) -> Result<G>,
    {
        config.validate()?;

        let publishable_key =
            PublishableKey::from_embedded(&page.embedded_text(&config.public_key_id)?)?;
        let client_secret =
            ClientSecret::from_embedded(&page.embedded_text(&config.client_secret_id)?)?;

        let gateway = connect(&publishable_key)?;
        let card = gateway.create_card(&config.card_style)?;
        card.mount(&config.card_selector())?;
        info!(selector = %config.card_selector(), "Card field mounted");

        Ok(Self {
            config,
            page,
            gateway,
            backend,
            card,
            client_secret,
            state: RefCell::new(SubmitState::Idle),
        })
    }

    pub fn card(&self) -> &G::Card {
        &self.card
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn state(&self) -> SubmitState {
        self.state.borrow().clone()
    }

    /// Live validation display for a card field `change` event
    pub fn on_card_change(&self, event: &CardChange) {
        match &event.error {
            Some(error) => self.page.show_error(&error.message),
            None => self.page.clear_error(),
        }
    }

    /// Run the submit handshake to its next resting state.
    ///
    /// The caller has already prevented native submission. Submits arriving
    /// while a handshake is in flight (or after it ended the page) are
    /// ignored.
    pub async fn submit(&self) -> Result<SubmitState> {
        let current = self.state();
        if !current.accepts_submit() {
            warn!(state = %current, "Ignoring submit while not idle");
            return Ok(current);
        }

        let save_info = self.page.save_info_checked()?;
        let snapshot = FormSnapshot::collect(|field| self.read_field(field), save_info)?;

        self.transition(SubmitState::Submitting)?;
        self.card.set_disabled(true);
        self.page.set_submit_disabled(true);
        self.page.set_loading(true);

        let data = snapshot.cache_data(&self.client_secret);
        if let Err(e) = self.backend.cache_checkout_data(&data).await {
            // Server-side flash messages explain the failure after reload
            warn!(
                error = %e,
                transport = e.is_transport(),
                "Caching checkout data failed, reloading page"
            );
            self.transition(SubmitState::FailedCache)?;
            self.page.reload();
            return Ok(self.state());
        }

        self.transition(SubmitState::Confirming)?;
        debug!(save_info, "Checkout data cached, confirming card payment");

        let outcome = self
            .gateway
            .confirm_card_payment(&self.client_secret, &self.card, &snapshot.card_payment_details())
            .await;

        match outcome {
            Ok(ConfirmOutcome::PaymentIntent { status }) if status == self.config.success_status => {
                info!("Payment succeeded, submitting order form");
                self.transition(SubmitState::Succeeded)?;
                self.page.submit_form();
            }
            Ok(ConfirmOutcome::PaymentIntent { status }) => {
                warn!(status = %status, "Payment intent neither succeeded nor failed");
                self.transition(SubmitState::Unresolved(status))?;
            }
            Ok(ConfirmOutcome::Declined { message }) => {
                info!(message = %message, "Card payment declined");
                self.restore_after_failed_confirm(&message)?;
            }
            Err(e) => {
                warn!(error = %e, "Card payment confirmation failed");
                self.restore_after_failed_confirm(e.user_message())?;
            }
        }

        Ok(self.state())
    }

    fn read_field(&self, field: FormField) -> Result<String> {
        self.page.field_value(field.name())
    }

    fn restore_after_failed_confirm(&self, message: &str) -> Result<()> {
        self.transition(SubmitState::FailedConfirm)?;
        self.page.show_error(message);
        self.page.set_loading(false);
        self.card.set_disabled(false);
        self.page.set_submit_disabled(false);
        self.transition(SubmitState::Idle)
    }

    fn transition(&self, next: SubmitState) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let next = state.transition(next)?;
        debug!(from = %state, to = %next, "Submit state transition");
        *state = next;
        Ok(())
    }
}
