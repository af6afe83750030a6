//! Backend contract: endpoint paths, request/response bodies and the
//! transport-agnostic [`SurveyBackend`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{GeocodeResponse, LocationFix};
use crate::types::SurveyEntry;

/// Endpoint paths, relative to the configured API base URL
pub mod endpoints {
    pub const LOGIN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const PROFILE: &str = "/api/auth/profile";
    pub const FORM_DATA: &str = "/api/form/data";
    pub const FORM_SUBMIT: &str = "/api/form/submit";
    pub const DOWNLOAD_EXCEL: &str = "/api/form/download-excel";
    pub const GEOCODE: &str = "/api/geocode";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub phone: String,
    pub password: String,
}

/// Surveyor identity returned by the profile lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyorProfile {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: SurveyorProfile,
}

/// Error body; the auth routes use `message`, the form routes `error`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Builds an [`Error::Backend`] from a failed response's status and body.
pub fn backend_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty());
    Error::Backend { status, message }
}

/// Join `base` and `path` without doubling the slash.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Profile path for a surveyor name, percent-encoding what a path segment
/// cannot carry.
pub fn profile_path(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for b in name.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(b as char)
            }
            _ => encoded.push_str(&format!("%{b:02X}")),
        }
    }
    format!("{}/{}", endpoints::PROFILE, encoded)
}

/// Everything the client asks of the backend.
///
/// Implementations attach the session token to each request; authorization
/// is the backend's job.
#[async_trait(?Send)]
pub trait SurveyBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<()>;

    async fn profile(&self, name: &str) -> Result<SurveyorProfile>;

    async fn fetch_entries(&self) -> Result<Vec<SurveyEntry>>;

    async fn submit_entry(&self, entry: &SurveyEntry) -> Result<()>;

    /// Raw spreadsheet bytes
    async fn download_excel(&self) -> Result<Vec<u8>>;

    async fn reverse_geocode(&self, fix: LocationFix) -> Result<GeocodeResponse>;
}
