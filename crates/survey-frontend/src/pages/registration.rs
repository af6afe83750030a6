//! Admin form for creating surveyor accounts.

use leptos::*;
use survey_core::api::RegisterRequest;
use survey_core::auth::{self, REGISTER_FAILED, REGISTER_SUCCESS};
use survey_core::validation::FieldErrors;

use crate::components::TextField;
use crate::state::use_app_state;

#[component]
pub fn SurveyorRegistration(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let app = use_app_state();

    let full_name = create_rw_signal(String::new());
    let username = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let submitting = create_rw_signal(false);

    let error_for = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).copied()));
    let edit = move |field: &'static str, target: RwSignal<String>| {
        Callback::new(move |value: String| {
            target.set(value);
            errors.update(|e| {
                e.remove(field);
            });
        })
    };

    let clear = move || {
        for field in [full_name, username, phone, password] {
            field.set(String::new());
        }
        errors.set(FieldErrors::new());
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = RegisterRequest {
            full_name: full_name.get_untracked(),
            username: username.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
        };
        let found = auth::validate_registration(&request);
        if !found.is_empty() {
            errors.set(found);
            return;
        }

        submitting.set(true);
        spawn_local(async move {
            let backend = app.backend();
            match auth::register(&*backend, &request).await {
                Ok(()) => {
                    app.toasts.success(REGISTER_SUCCESS);
                    clear();
                    on_done.call(());
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    app.toasts.error(e.user_message(REGISTER_FAILED));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="card registration">
            <div class="card-header">
                <h2>"Register New Surveyor"</h2>
                <button class="link-btn" on:click=move |_| on_done.call(())>"Back"</button>
            </div>

            <form on:submit=on_submit>
                <TextField
                    label="Full Name"
                    required=true
                    value=full_name
                    error=error_for("fullName")
                    on_input=edit("fullName", full_name)
                />
                <TextField
                    label="Username"
                    required=true
                    value=username
                    error=error_for("username")
                    on_input=edit("username", username)
                />
                <TextField
                    label="Phone"
                    required=true
                    input_type="tel"
                    value=phone
                    error=error_for("phone")
                    on_input=edit("phone", phone)
                />
                <TextField
                    label="Password"
                    required=true
                    input_type="password"
                    value=password
                    error=error_for("password")
                    on_input=edit("password", password)
                />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register Surveyor" }}
                </button>
            </form>
        </div>
    }
}
