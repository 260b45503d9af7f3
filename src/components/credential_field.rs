//! Labelled input bound to one field of a `CredentialForm`.

use leptos::prelude::*;

use crate::state::form::{CredentialForm, Field};

/// Text input with helper text showing the field's validation message.
#[component]
pub fn CredentialField(
    form: RwSignal<CredentialForm>,
    field: Field,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let error = move || form.with(|f| f.field_error(field));

    view! {
        <label class=move || {
            if error().is_some() { "credential-field credential-field--error" } else { "credential-field" }
        }>
            <span class="credential-field__label">{label}</span>
            <input
                class="credential-field__input"
                id=field.name()
                name=field.name()
                type=input_type
                prop:value=move || form.with(|f| f.value(field).to_owned())
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
            />
            <Show when=move || error().is_some()>
                <p class="credential-field__helper">{move || error().unwrap_or_default()}</p>
            </Show>
        </label>
    }
}
