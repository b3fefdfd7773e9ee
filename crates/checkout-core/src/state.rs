//! Submit State Machine
//!
//! ```text
//!   Idle ──▶ Submitting ──▶ Confirming ──▶ Succeeded
//!    ▲            │              │    └──▶ Unresolved(status)
//!    │            ▼              ▼
//!    │       FailedCache    FailedConfirm
//!    └───────────────────────────┘
//! ```
//!
//! `FailedCache` is followed by a page reload, `Succeeded` by native form
//! submission; neither is left within the page's lifetime.

use crate::error::{CheckoutError, Result};

/// Where the submit handshake currently stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Waiting for the user to submit
    #[default]
    Idle,

    /// Controls disabled, caching request in flight
    Submitting,

    /// Backend acknowledged; card confirmation in flight
    Confirming,

    /// Backend rejected or unreachable; page is reloading
    FailedCache,

    /// Confirmation reported an error; controls restored
    FailedConfirm,

    /// Payment intent succeeded; form submitted natively
    Succeeded,

    /// Confirmation returned a payment intent whose status is not the
    /// success status (e.g. `requires_action`). No transition leaves it.
    Unresolved(String),
}

impl SubmitState {
    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(&self, next: &SubmitState) -> bool {
        use SubmitState::*;
        matches!(
            (self, next),
            (Idle, Submitting)
                | (Submitting, Confirming)
                | (Submitting, FailedCache)
                | (Confirming, Succeeded)
                | (Confirming, FailedConfirm)
                | (Confirming, Unresolved(_))
                | (FailedConfirm, Idle)
        )
    }

    /// Checked transition
    pub fn transition(&self, next: SubmitState) -> Result<SubmitState> {
        if self.can_transition_to(&next) {
            Ok(next)
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// No edge leaves this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmitState::FailedCache | SubmitState::Succeeded | SubmitState::Unresolved(_)
        )
    }

    /// A new submit may start from here
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmitState::Idle)
    }
}

impl std::fmt::Display for SubmitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitState::Idle => write!(f, "idle"),
            SubmitState::Submitting => write!(f, "submitting"),
            SubmitState::Confirming => write!(f, "confirming"),
            SubmitState::FailedCache => write!(f, "failed_cache"),
            SubmitState::FailedConfirm => write!(f, "failed_confirm"),
            SubmitState::Succeeded => write!(f, "succeeded"),
            SubmitState::Unresolved(status) => write!(f, "unresolved({})", status),
        }
    }
}
