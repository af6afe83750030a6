//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime settings for the survey client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin; empty means same-origin
    pub api_base_url: String,

    /// Path of the reverse-geocoding proxy
    pub geocode_path: String,

    /// Rows per dashboard page
    pub page_size: usize,

    /// How long transient notifications stay up (milliseconds)
    pub notification_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            geocode_path: crate::api::endpoints::GEOCODE.to_string(),
            page_size: crate::dashboard::PAGE_SIZE,
            notification_timeout_ms: 5000,
        }
    }
}

impl ClientConfig {
    /// Defaults, then the API URL baked in at build time, then `SURVEY_*`
    /// environment variables (empty in the browser).
    pub fn load(build_api_url: Option<&str>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("geocode_path", defaults.geocode_path)?
            .set_default("page_size", defaults.page_size as u64)?
            .set_default("notification_timeout_ms", defaults.notification_timeout_ms)?;

        if let Some(url) = build_api_url.filter(|u| !u.trim().is_empty()) {
            builder = builder.set_override("api_base_url", url)?;
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SURVEY"))
            .build()?;

        let mut loaded: Self = settings.try_deserialize()?;
        loaded.page_size = loaded.page_size.max(1);
        Ok(loaded)
    }

    pub fn url(&self, path: &str) -> String {
        crate::api::endpoint_url(&self.api_base_url, path)
    }
}
