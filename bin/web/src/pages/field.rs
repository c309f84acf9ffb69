//! Labelled input bound to a string signal.

use leptos::prelude::*;

use crate::forms::FieldErrors;

#[component]
pub fn TextField(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label for=name>{label}</label>
            <input
                id=name
                name=name
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || {
                errors
                    .with(|errors| errors.get(name).copied())
                    .map(|message| view! { <span class="field-error">{message}</span> })
            }}
        </div>
    }
}
