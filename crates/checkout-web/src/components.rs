//! UI Components

use leptos::prelude::*;

/// Inline card error: alert icon followed by the message.
///
/// Renders nothing while `error` is `None`.
#[component]
pub fn CardErrors(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <span class="icon" role="alert">
                    <i class="fas fa-times"></i>
                </span>
                <span>{message}</span>
            }
        })
    }
}
