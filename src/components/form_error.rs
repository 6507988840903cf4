//! Inline Form Error

use leptos::prelude::*;
use registry_core::domain::FormState;

/// The last submission error of a form, if any
#[component]
pub fn FormError(form: RwSignal<FormState>) -> impl IntoView {
    move || {
        form.with(|f| f.error().map(str::to_string))
            .map(|msg| view! { <p class="form-error">{msg}</p> })
    }
}
