//! # Survey-Frontend
//!
//! Leptos front end for the property-tax household survey.
//!
//! ## Features
//!
//! - **Survey Wizard**: Four-step form with per-step validation, location
//!   lookup and camera capture
//! - **Admin Dashboard**: Submission statistics, search, paging and
//!   spreadsheet export
//! - **Surveyor Registration**: Admin-only account creation
//! - **Route Guard**: Client-side redirect for non-admin sessions

pub mod app;
pub mod components;
pub mod media;
pub mod network;
pub mod pages;
pub mod state;
pub mod utils;

pub use app::App;

use survey_core::ClientConfig;
use wasm_bindgen::prelude::*;

/// Initialize the application
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize tracing
    tracing_wasm::set_as_global_default();

    let config = match ClientConfig::load(option_env!("SURVEY_API_URL")) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid client configuration, using defaults: {}", e);
            ClientConfig::default()
        }
    };

    tracing::info!("Survey frontend initialized (api: {:?})", config.api_base_url);

    leptos::mount_to_body(move || leptos::view! { <App config=config.clone()/> });
}
