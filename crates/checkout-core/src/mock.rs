//! Mock Page, Gateway and Backend
//!
//! For testing and demo purposes. Every side effect is appended to a shared
//! [`Journal`] so tests can assert on ordering across the three seams.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::backend::CheckoutBackend;
use crate::error::{CheckoutError, Result};
use crate::form::{CacheCheckoutData, CardPaymentDetails, FormField};
use crate::page::CheckoutPage;
use crate::secrets::ClientSecret;
use crate::widget::{CardField, CardStyle, ConfirmOutcome, PaymentGateway};

/// Observable side effect
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalEntry {
    CardCreated,
    CardMounted(String),
    CardDisabled(bool),
    SubmitDisabled(bool),
    Loading(bool),
    ErrorShown(String),
    ErrorCleared,
    CacheRequested,
    ConfirmRequested,
    FormSubmitted,
    Reloaded,
}

/// Shared, ordered log of side effects
#[derive(Clone, Debug, Default)]
pub struct Journal(Rc<RefCell<Vec<JournalEntry>>>);

impl Journal {
    pub fn record(&self, entry: JournalEntry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.0.borrow().clone()
    }
}

/// In-memory checkout page
pub struct RecordingPage {
    journal: Journal,
    embedded: HashMap<String, String>,
    fields: HashMap<String, String>,
    save_info: bool,
    error_region: RefCell<Option<String>>,
}

impl RecordingPage {
    /// Empty page with no embedded values or fields
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            embedded: HashMap::new(),
            fields: HashMap::new(),
            save_info: false,
            error_region: RefCell::new(None),
        }
    }

    /// Page with quoted secrets under the default ids and every form field
    /// filled in
    pub fn filled(journal: Journal) -> Self {
        let mut page = Self::new(journal)
            .with_embedded("id_stripe_public_key", "\"pk_test_123\"")
            .with_embedded("id_client_secret", "\"pi_123_secret_456\"");

        for field in FormField::ALL {
            let value = match field {
                FormField::FullName => "Ada Lovelace",
                FormField::PhoneNumber => "+44 20 7946 0000",
                FormField::Email => "ada@example.com",
                FormField::StreetAddress1 => "12 Analytical Row",
                FormField::StreetAddress2 => "",
                FormField::TownOrCity => "London",
                FormField::Country => "GB",
                FormField::County => "Greater London",
                FormField::Postcode => "NW1 6XE",
                FormField::CsrfToken => "csrf-token",
            };
            page.fields.insert(field.name().to_string(), value.to_string());
        }
        page
    }

    pub fn with_embedded(mut self, id: &str, text: &str) -> Self {
        self.embedded.insert(id.to_string(), text.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    pub fn with_save_info(mut self, checked: bool) -> Self {
        self.save_info = checked;
        self
    }

    /// Current error region content; `None` when empty
    pub fn error_region(&self) -> Option<String> {
        self.error_region.borrow().clone()
    }
}

impl CheckoutPage for RecordingPage {
    fn embedded_text(&self, id: &str) -> Result<String> {
        self.embedded
            .get(id)
            .cloned()
            .ok_or_else(|| CheckoutError::MissingElement(format!("#{}", id)))
    }

    fn field_value(&self, name: &str) -> Result<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| CheckoutError::MissingElement(format!("[name={}]", name)))
    }

    fn save_info_checked(&self) -> Result<bool> {
        Ok(self.save_info)
    }

    fn show_error(&self, message: &str) {
        *self.error_region.borrow_mut() = Some(message.to_string());
        self.journal.record(JournalEntry::ErrorShown(message.to_string()));
    }

    fn clear_error(&self) {
        *self.error_region.borrow_mut() = None;
        self.journal.record(JournalEntry::ErrorCleared);
    }

    fn set_submit_disabled(&self, disabled: bool) {
        self.journal.record(JournalEntry::SubmitDisabled(disabled));
    }

    fn set_loading(&self, loading: bool) {
        self.journal.record(JournalEntry::Loading(loading));
    }

    fn submit_form(&self) {
        self.journal.record(JournalEntry::FormSubmitted);
    }

    fn reload(&self) {
        self.journal.record(JournalEntry::Reloaded);
    }
}

pub struct MockCard {
    journal: Journal,
}

impl CardField for MockCard {
    fn mount(&self, selector: &str) -> Result<()> {
        self.journal.record(JournalEntry::CardMounted(selector.to_string()));
        Ok(())
    }

    fn set_disabled(&self, disabled: bool) {
        self.journal.record(JournalEntry::CardDisabled(disabled));
    }
}

/// Gateway replaying scripted confirmation outcomes in order
pub struct MockPaymentGateway {
    journal: Journal,
    outcomes: RefCell<VecDeque<Result<ConfirmOutcome>>>,
    last_details: RefCell<Option<CardPaymentDetails>>,
    last_client_secret: RefCell<Option<String>>,
}

impl MockPaymentGateway {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            outcomes: RefCell::new(VecDeque::new()),
            last_details: RefCell::new(None),
            last_client_secret: RefCell::new(None),
        }
    }

    /// Queue the result of the next confirmation
    pub fn with_outcome(self, outcome: Result<ConfirmOutcome>) -> Self {
        self.outcomes.borrow_mut().push_back(outcome);
        self
    }

    pub fn last_details(&self) -> Option<CardPaymentDetails> {
        self.last_details.borrow().clone()
    }

    pub fn last_client_secret(&self) -> Option<String> {
        self.last_client_secret.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PaymentGateway for MockPaymentGateway {
    type Card = MockCard;

    fn create_card(&self, _style: &CardStyle) -> Result<MockCard> {
        self.journal.record(JournalEntry::CardCreated);
        Ok(MockCard {
            journal: self.journal.clone(),
        })
    }

    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        _card: &MockCard,
        details: &CardPaymentDetails,
    ) -> Result<ConfirmOutcome> {
        self.journal.record(JournalEntry::ConfirmRequested);
        *self.last_details.borrow_mut() = Some(details.clone());
        *self.last_client_secret.borrow_mut() = Some(client_secret.as_str().to_string());

        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(CheckoutError::Widget("no scripted outcome".into())))
    }
}

enum BackendScript {
    Succeed,
    Reject(u16),
    Fail(RefCell<Option<CheckoutError>>),
}

/// Backend answering every request the same way
pub struct MockCheckoutBackend {
    journal: Journal,
    script: BackendScript,
    last_request: RefCell<Option<CacheCheckoutData>>,
}

impl MockCheckoutBackend {
    fn with_script(journal: Journal, script: BackendScript) -> Self {
        Self {
            journal,
            script,
            last_request: RefCell::new(None),
        }
    }

    /// Answers 200
    pub fn succeeding(journal: Journal) -> Self {
        Self::with_script(journal, BackendScript::Succeed)
    }

    /// Answers with a non-2xx `status`
    pub fn rejecting(journal: Journal, status: u16) -> Self {
        Self::with_script(journal, BackendScript::Reject(status))
    }

    /// Fails once with `error` before any response
    pub fn failing(journal: Journal, error: CheckoutError) -> Self {
        Self::with_script(journal, BackendScript::Fail(RefCell::new(Some(error))))
    }

    pub fn last_request(&self) -> Option<CacheCheckoutData> {
        self.last_request.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CheckoutBackend for MockCheckoutBackend {
    async fn cache_checkout_data(&self, data: &CacheCheckoutData) -> Result<()> {
        self.journal.record(JournalEntry::CacheRequested);
        *self.last_request.borrow_mut() = Some(data.clone());

        match &self.script {
            BackendScript::Succeed => Ok(()),
            BackendScript::Reject(status) => Err(CheckoutError::Backend {
                status: Some(*status),
                message: "Sorry, your payment cannot be processed right now.".into(),
            }),
            BackendScript::Fail(error) => Err(error.borrow_mut().take().unwrap_or_else(|| {
                CheckoutError::Backend {
                    status: None,
                    message: "connection reset".into(),
                }
            })),
        }
    }
}
