//! In-memory backend for flow tests.

use async_trait::async_trait;
use std::cell::RefCell;

use crate::api::{
    backend_error, Credentials, LoginResponse, RegisterRequest, SurveyBackend, SurveyorProfile,
    AuthUser,
};
use crate::error::{Error, Result};
use crate::geo::{GeocodeResponse, LocationFix};
use crate::types::SurveyEntry;

#[derive(Default)]
pub struct FakeBackend {
    pub role: String,
    pub reject_with: Option<String>,
    pub submitted: RefCell<Vec<SurveyEntry>>,
    pub registered: RefCell<Vec<RegisterRequest>>,
}

#[async_trait(?Send)]
impl SurveyBackend for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        if let Some(body) = &self.reject_with {
            return Err(backend_error(401, body));
        }
        Ok(LoginResponse {
            token: format!("token-for-{}", credentials.username),
            user: AuthUser {
                username: credentials.username.clone(),
                role: self.role.clone(),
            },
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        if let Some(body) = &self.reject_with {
            return Err(backend_error(409, body));
        }
        self.registered.borrow_mut().push(request.clone());
        Ok(())
    }

    async fn profile(&self, name: &str) -> Result<SurveyorProfile> {
        Ok(SurveyorProfile {
            name: name.to_string(),
            phone: "9876543210".to_string(),
        })
    }

    async fn fetch_entries(&self) -> Result<Vec<SurveyEntry>> {
        Ok(self.submitted.borrow().clone())
    }

    async fn submit_entry(&self, entry: &SurveyEntry) -> Result<()> {
        if let Some(body) = &self.reject_with {
            return Err(backend_error(500, body));
        }
        self.submitted.borrow_mut().push(entry.clone());
        Ok(())
    }

    async fn download_excel(&self) -> Result<Vec<u8>> {
        Err(Error::Network("not available".to_string()))
    }

    async fn reverse_geocode(&self, _fix: LocationFix) -> Result<GeocodeResponse> {
        Ok(GeocodeResponse::default())
    }
}
