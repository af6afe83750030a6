//! # Survey-Core
//!
//! Domain logic for the Delhi Cantonment Board property tax survey client.
//!
//! ## Modules
//!
//! - **types**: survey records as stored by the backend
//! - **wizard**: four-step data entry state machine with per-step validation
//! - **dashboard**: surveyor aggregation, search, pagination, export naming
//! - **session**: persisted session context and the admin route guard
//! - **auth**: login and surveyor registration flows
//! - **geo** / **capture**: geolocation outcomes and camera stream lifecycle
//! - **api**: backend endpoints and the [`SurveyBackend`] seam
//!
//! Nothing here touches the browser; the frontend crate supplies the
//! `localStorage`, HTTP, geolocation and camera implementations.

pub mod api;
pub mod auth;
pub mod capture;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geo;
pub mod session;
pub mod types;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod testing;

pub use api::SurveyBackend;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::*;
