//! Landing page for surveyors before the form.

use leptos::*;
use leptos_router::use_navigate;
use survey_core::session::Route;

use crate::state::use_app_state;

const STEPS: [&str; 5] = [
    "Before the form opens, a pop-up will appear requesting your current location. Please grant this permission.",
    "Keep your property documents (ownership proof, previous tax receipts) ready.",
    "Enter your personal and property details as required in the form.",
    "All fields marked with an asterisk (*) are mandatory. Please ensure you fill them out accurately.",
    "Once all fields are filled and validated, you can click \"Submit\" to complete the survey.",
];

#[component]
pub fn Instructions() -> impl IntoView {
    let app = use_app_state();
    let navigate = use_navigate();
    let to_form = navigate.clone();

    let logout = move |_| {
        app.logout();
        navigate(Route::Auth.path(), Default::default());
    };

    view! {
        <div class="instructions">
            <h2>"Welcome To Delhi Cantonment Board Survey"</h2>
            <p class="lead">
                "Surveyors will visit households in Delhi Cantonment to collect property details and fill forms for the Property Tax Survey."
            </p>

            <div class="card">
                <h3>"Instructions to Fill the Form"</h3>
                <ul>
                    {STEPS.iter().map(|step| view! { <li>{*step}</li> }).collect::<Vec<_>>()}
                </ul>
            </div>

            <div class="actions">
                <button class="primary-btn" on:click=move |_| to_form(Route::Form.path(), Default::default())>
                    "Proceed to Form"
                </button>
                <button class="danger-btn" on:click=logout>"Logout"</button>
            </div>
        </div>
    }
}
