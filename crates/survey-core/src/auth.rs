//! Login and surveyor registration flows.

use crate::api::{Credentials, RegisterRequest, SurveyBackend};
use crate::error::{Error, Result};
use crate::session::{Route, Session, SessionContext, SessionStore};
use crate::types::Role;
use crate::validation::{Checker, FieldErrors};

pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_SUCCESS: &str = "Surveyor registered successfully!";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

pub fn validate_credentials(credentials: &Credentials) -> FieldErrors {
    let mut check = Checker::new();
    check
        .require("username", &credentials.username, "Username is required.")
        .require("password", &credentials.password, "Password is required.");
    check.finish()
}

pub fn validate_registration(request: &RegisterRequest) -> FieldErrors {
    let mut check = Checker::new();
    check
        .require("fullName", &request.full_name, "Full name is required.")
        .require("username", &request.username, "Username is required.")
        .require("phone", &request.phone, "Phone is required.")
        .require("password", &request.password, "Password is required.");
    check.finish()
}

/// Log in, persist the session and pick the next route by role.
pub async fn login<S, B>(
    session: &SessionContext<S>,
    backend: &B,
    credentials: &Credentials,
) -> Result<(Session, Route)>
where
    S: SessionStore,
    B: SurveyBackend + ?Sized,
{
    let errors = validate_credentials(credentials);
    if !errors.is_empty() {
        return Err(Error::Validation {
            count: errors.len(),
        });
    }

    let response = backend.login(credentials).await.map_err(|e| {
        tracing::warn!(user = %credentials.username, error = %e, "login rejected");
        e
    })?;
    let established = session.establish(&response)?;
    let route = Route::landing_for(Role::from_backend(&response.user.role));
    Ok((established, route))
}

/// Register a surveyor account.
pub async fn register<B>(backend: &B, request: &RegisterRequest) -> Result<()>
where
    B: SurveyBackend + ?Sized,
{
    let errors = validate_registration(request);
    if !errors.is_empty() {
        return Err(Error::Validation {
            count: errors.len(),
        });
    }
    backend.register(request).await?;
    tracing::info!(username = %request.username, "surveyor registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use crate::session::{MemoryStore, ADMIN_KEY};
    use futures::executor::block_on;

    fn creds(user: &str) -> Credentials {
        Credentials {
            username: user.to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_admin_login_goes_to_dashboard() {
        let session = SessionContext::new(MemoryStore::new());
        let backend = FakeBackend {
            role: "admin".to_string(),
            ..Default::default()
        };
        let (s, route) = block_on(login(&session, &backend, &creds("chief"))).unwrap();
        assert!(s.is_admin);
        assert_eq!(route, Route::AdminDashboard);
        assert_eq!(session.store().get(ADMIN_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_surveyor_login_goes_to_instructions() {
        let session = SessionContext::new(MemoryStore::new());
        let backend = FakeBackend {
            role: "surveyor".to_string(),
            ..Default::default()
        };
        let (_, route) = block_on(login(&session, &backend, &creds("ravi"))).unwrap();
        assert_eq!(route, Route::Instructions);
        assert_eq!(session.store().get(ADMIN_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_rejected_login_surfaces_backend_message() {
        let session = SessionContext::new(MemoryStore::new());
        let backend = FakeBackend {
            reject_with: Some(r#"{"message":"Invalid username or password"}"#.to_string()),
            ..Default::default()
        };
        let err = block_on(login(&session, &backend, &creds("ravi"))).unwrap_err();
        assert_eq!(err.user_message(LOGIN_FAILED), "Invalid username or password");
        assert!(session.current().is_none());
    }

    #[test]
    fn test_blank_credentials_never_reach_backend() {
        let session = SessionContext::new(MemoryStore::new());
        let backend = FakeBackend {
            reject_with: Some("{}".to_string()),
            ..Default::default()
        };
        let err = block_on(login(&session, &backend, &Credentials::default())).unwrap_err();
        assert_eq!(err, Error::Validation { count: 2 });
    }

    #[test]
    fn test_register() {
        let backend = FakeBackend::default();
        let request = RegisterRequest {
            full_name: "Asha Verma".to_string(),
            username: "asha".to_string(),
            phone: "9876543210".to_string(),
            password: "secret".to_string(),
        };
        block_on(register(&backend, &request)).unwrap();
        assert_eq!(backend.registered.borrow().len(), 1);

        let incomplete = RegisterRequest {
            password: String::new(),
            ..request
        };
        assert!(matches!(
            block_on(register(&backend, &incomplete)),
            Err(Error::Validation { count: 1 })
        ));
    }
}
