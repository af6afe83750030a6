//! HTTP client for the survey backend.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use survey_core::api::{
    backend_error, endpoints, profile_path, Credentials, LoginResponse, ProfileResponse,
    RegisterRequest, SurveyBackend, SurveyorProfile,
};
use survey_core::geo::{GeocodeResponse, LocationFix};
use survey_core::session::SessionContext;
use survey_core::{ClientConfig, Error, Result, SurveyEntry};

use crate::state::LocalStorage;

fn network_error(e: gloo_net::Error) -> Error {
    Error::Network(e.to_string())
}

/// A body that arrived but doesn't match the expected shape.
fn decode_error(e: gloo_net::Error) -> Error {
    match e {
        gloo_net::Error::SerdeError(e) => Error::Serialization(e.to_string()),
        other => network_error(other),
    }
}

/// [`SurveyBackend`] over `fetch`. Every request carries the session token
/// as a bearer credential when one is stored.
pub struct HttpBackend {
    config: ClientConfig,
    session: SessionContext<LocalStorage>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig, session: SessionContext<LocalStorage>) -> Self {
        Self { config, session }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(Request::get(&self.config.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(Request::post(&self.config.url(path)))
    }

    /// Pass successful responses through; turn the rest into
    /// [`Error::Backend`] carrying the body's message.
    async fn checked(response: Response) -> Result<Response> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Request to {} failed with status {}", response.url(), status);
        Err(backend_error(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T> {
        let response = request.send().await.map_err(network_error)?;
        let response = Self::checked(response).await?;
        response.json::<T>().await.map_err(decode_error)
    }
}

#[async_trait(?Send)]
impl SurveyBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self
            .post(endpoints::LOGIN)
            .json(credentials)
            .map_err(network_error)?;
        Self::send_json(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let request = self
            .post(endpoints::REGISTER)
            .json(request)
            .map_err(network_error)?;
        let response = request.send().await.map_err(network_error)?;
        Self::checked(response).await?;
        Ok(())
    }

    async fn profile(&self, name: &str) -> Result<SurveyorProfile> {
        let response = self
            .get(&profile_path(name))
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response).await?;
        let body: ProfileResponse = response.json().await.map_err(decode_error)?;
        Ok(body.user)
    }

    async fn fetch_entries(&self) -> Result<Vec<SurveyEntry>> {
        let response = self
            .get(endpoints::FORM_DATA)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response).await?;
        response.json().await.map_err(decode_error)
    }

    async fn submit_entry(&self, entry: &SurveyEntry) -> Result<()> {
        let request = self
            .post(endpoints::FORM_SUBMIT)
            .json(entry)
            .map_err(network_error)?;
        let response = request.send().await.map_err(network_error)?;
        Self::checked(response).await?;
        Ok(())
    }

    async fn download_excel(&self) -> Result<Vec<u8>> {
        let response = self
            .get(endpoints::DOWNLOAD_EXCEL)
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response).await?;
        response.binary().await.map_err(network_error)
    }

    async fn reverse_geocode(&self, fix: LocationFix) -> Result<GeocodeResponse> {
        let url = format!("{}?{}", self.config.url(&self.config.geocode_path), fix.query());
        let response = self
            .authorized(Request::get(&url))
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response).await?;
        response.json().await.map_err(decode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_body_is_a_decode_error() {
        let bad = serde_json::from_str::<Vec<SurveyEntry>>("{\"entries\":").unwrap_err();
        let err = decode_error(gloo_net::Error::SerdeError(bad));
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_transport_failure_stays_a_network_error() {
        let err = decode_error(gloo_net::Error::GlooError("body stream closed".into()));
        assert!(matches!(err, Error::Network(_)));
    }
}
