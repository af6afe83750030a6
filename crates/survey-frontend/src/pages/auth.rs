//! Login screen.

use leptos::*;
use leptos_router::use_navigate;
use survey_core::api::Credentials;
use survey_core::auth::{self, LOGIN_FAILED, LOGIN_SUCCESS};
use survey_core::session::Route;
use survey_core::validation::FieldErrors;

use crate::components::TextField;
use crate::state::use_app_state;

#[derive(Clone, Debug, PartialEq)]
enum Banner {
    Success(String),
    Failure(String),
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let app = use_app_state();
    let navigate = use_navigate();

    // An admin session skips the login form
    let skip = navigate.clone();
    create_effect(move |_| {
        if app.session().is_some_and(|s| s.is_admin) {
            skip(Route::AdminDashboard.path(), Default::default());
        }
    });

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let show_password = create_rw_signal(false);
    let errors = create_rw_signal(FieldErrors::new());
    let submitting = create_rw_signal(false);
    let banner = create_rw_signal(None::<Banner>);

    let error_for = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).copied()));
    let edit = move |field: &'static str, target: RwSignal<String>| {
        Callback::new(move |value: String| {
            target.set(value);
            errors.update(|e| {
                e.remove(field);
            });
        })
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let found = auth::validate_credentials(&credentials);
        if !found.is_empty() {
            errors.set(found);
            return;
        }

        submitting.set(true);
        banner.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            let session = app.session_context();
            let backend = app.backend();
            match auth::login(&session, &*backend, &credentials).await {
                Ok((_, route)) => {
                    banner.set(Some(Banner::Success(LOGIN_SUCCESS.to_string())));
                    app.session_changed();
                    navigate(route.path(), Default::default());
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    banner.set(Some(Banner::Failure(e.user_message(LOGIN_FAILED))));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h3>"Login"</h3>
                <p class="subtitle">"Registered User Only!"</p>

                <form on:submit=on_submit>
                    <TextField
                        label="Username"
                        required=true
                        value=username
                        error=error_for("username")
                        on_input=edit("username", username)
                    />
                    <div class="password-row">
                        <TextField
                            label="Password"
                            required=true
                            input_type=Signal::derive(move || {
                                if show_password.get() { "text" } else { "password" }
                            })
                            value=password
                            error=error_for("password")
                            on_input=edit("password", password)
                        />
                        <button
                            type="button"
                            class="toggle-visibility"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>

                    {move || banner.get().map(|b| match b {
                        Banner::Success(text) => view! { <p class="banner success">{text}</p> },
                        Banner::Failure(text) => view! { <p class="banner error">{text}</p> },
                    })}

                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
