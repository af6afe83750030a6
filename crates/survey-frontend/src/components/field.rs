//! Labelled form inputs with an inline error line.

use leptos::*;

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, default = MaybeSignal::Static("text"))] input_type: MaybeSignal<&'static str>,
    #[prop(optional, into)] readonly: MaybeSignal<bool>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">
                {label}
                {required.then_some(" *")}
            </span>
            <input
                type=move || input_type.get()
                class=move || if error.get().is_some() { "input invalid" } else { "input" }
                prop:value=move || value.get()
                readonly=move || readonly.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </label>
    }
}

/// A `<select>` over a fixed list of labels. The empty option maps to `""`.
#[component]
pub fn ChoiceField(
    label: &'static str,
    options: Vec<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(default = Some("Select"))] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}" *"</span>
            <select
                class=move || if error.get().is_some() { "input invalid" } else { "input" }
                prop:value=move || value.get()
                on:change=move |ev| on_change.call(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {options
                    .into_iter()
                    .map(|opt| view! { <option value=opt>{opt}</option> })
                    .collect::<Vec<_>>()}
            </select>
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </label>
    }
}
