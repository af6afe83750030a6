//! Session context over a persistent key/value store, plus the route guard.
//!
//! Three string keys are persisted: `token`, `isAdmin` ("true"/"false") and
//! `name`. Only login writes them and only [`SessionContext::logout`]
//! clears them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::LoginResponse;
use crate::error::Result;
use crate::types::Role;

pub const TOKEN_KEY: &str = "token";
pub const ADMIN_KEY: &str = "isAdmin";
pub const NAME_KEY: &str = "name";

/// Durable string storage (browser `localStorage` in production)
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Snapshot of the persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub is_admin: bool,
    pub display_name: Option<String>,
}

/// Client routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    Instructions,
    Form,
    AdminDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Instructions => "/instructions",
            Route::Form => "/form",
            Route::AdminDashboard => "/admin-dashboard",
        }
    }

    /// Where a freshly logged-in user goes
    pub fn landing_for(role: Role) -> Self {
        if role.is_admin() {
            Route::AdminDashboard
        } else {
            Route::Instructions
        }
    }
}

/// Outcome of the admin route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

/// Admin-only gate. This steers the UI only; the backend must authorize
/// every request on its own.
pub fn guard_admin(session: Option<&Session>) -> GuardDecision {
    match session {
        None => GuardDecision::Redirect(Route::Auth),
        Some(s) if !s.is_admin => GuardDecision::Redirect(Route::Instructions),
        Some(_) => GuardDecision::Render,
    }
}

/// Typed access to the persisted session
#[derive(Debug, Clone)]
pub struct SessionContext<S> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current session, if a non-empty token is stored
    pub fn current(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            is_admin: self.store.get(ADMIN_KEY).as_deref() == Some("true"),
            display_name: self.store.get(NAME_KEY).filter(|n| !n.is_empty()),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn is_admin(&self) -> bool {
        self.current().is_some_and(|s| s.is_admin)
    }

    pub fn display_name(&self) -> Option<String> {
        self.current().and_then(|s| s.display_name)
    }

    /// Persist a successful login. The admin flag comes from the backend
    /// role and nothing else.
    pub fn establish(&self, response: &LoginResponse) -> Result<Session> {
        let role = Role::from_backend(&response.user.role);
        // The token goes last so a half-written session never carries an
        // earlier login's admin flag.
        let written = self
            .store
            .set(ADMIN_KEY, if role.is_admin() { "true" } else { "false" })
            .and_then(|()| self.store.set(NAME_KEY, &response.user.username))
            .and_then(|()| self.store.set(TOKEN_KEY, &response.token));
        if let Err(e) = written {
            tracing::warn!(error = %e, "session write failed, clearing");
            let _ = self.logout();
            return Err(e);
        }
        tracing::info!(user = %response.user.username, admin = role.is_admin(), "session established");

        Ok(Session {
            token: response.token.clone(),
            is_admin: role.is_admin(),
            display_name: Some(response.user.username.clone()),
        })
    }

    /// Clear all three keys. Every key is attempted even if one fails; the
    /// first failure is reported.
    pub fn logout(&self) -> Result<()> {
        let results = [TOKEN_KEY, ADMIN_KEY, NAME_KEY].map(|key| self.store.remove(key));
        tracing::info!("session cleared");
        results.into_iter().collect()
    }

    pub fn guard_admin(&self) -> GuardDecision {
        guard_admin(self.current().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthUser;
    use crate::error::Error;

    /// Refuses writes to one key.
    struct RefusingStore {
        inner: MemoryStore,
        refused: &'static str,
    }

    impl SessionStore for RefusingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == self.refused {
                return Err(Error::Storage("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn stale_admin_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "old-admin-jwt").unwrap();
        store.set(ADMIN_KEY, "true").unwrap();
        store.set(NAME_KEY, "admin").unwrap();
        store
    }

    fn login(role: &str) -> LoginResponse {
        LoginResponse {
            token: "jwt-abc".to_string(),
            user: AuthUser {
                username: "ravi".to_string(),
                role: role.to_string(),
            },
        }
    }

    #[test]
    fn test_guard_decisions() {
        assert_eq!(guard_admin(None), GuardDecision::Redirect(Route::Auth));

        let surveyor = Session {
            token: "t".into(),
            is_admin: false,
            display_name: None,
        };
        assert_eq!(
            guard_admin(Some(&surveyor)),
            GuardDecision::Redirect(Route::Instructions)
        );

        let admin = Session {
            is_admin: true,
            ..surveyor
        };
        assert_eq!(guard_admin(Some(&admin)), GuardDecision::Render);
    }

    #[test]
    fn test_admin_flag_from_role() {
        let ctx = SessionContext::new(MemoryStore::new());
        ctx.establish(&login("admin")).unwrap();
        assert_eq!(ctx.store().get(ADMIN_KEY).as_deref(), Some("true"));
        assert_eq!(ctx.guard_admin(), GuardDecision::Render);

        ctx.establish(&login("surveyor")).unwrap();
        assert_eq!(ctx.store().get(ADMIN_KEY).as_deref(), Some("false"));
        assert_eq!(ctx.display_name().as_deref(), Some("ravi"));
    }

    #[test]
    fn test_flag_without_token_is_ignored() {
        let store = MemoryStore::new();
        store.set(ADMIN_KEY, "true").unwrap();
        let ctx = SessionContext::new(store);
        assert!(ctx.current().is_none());
        assert!(!ctx.is_admin());
        assert_eq!(ctx.guard_admin(), GuardDecision::Redirect(Route::Auth));
    }

    #[test]
    fn test_logout_clears_everything() {
        let ctx = SessionContext::new(MemoryStore::new());
        ctx.establish(&login("admin")).unwrap();
        ctx.logout().unwrap();
        for key in [TOKEN_KEY, ADMIN_KEY, NAME_KEY] {
            assert!(ctx.store().get(key).is_none());
        }
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_failed_login_write_leaves_no_admin_behind() {
        for refused in [ADMIN_KEY, NAME_KEY, TOKEN_KEY] {
            let inner = stale_admin_store();
            let ctx = SessionContext::new(RefusingStore {
                inner: inner.clone(),
                refused,
            });
            let err = ctx.establish(&login("surveyor")).unwrap_err();
            assert!(matches!(err, Error::Storage(_)));
            assert!(ctx.current().is_none(), "session survived refused {refused}");
            assert!(inner.get(ADMIN_KEY).is_none());
            assert_eq!(ctx.guard_admin(), GuardDecision::Redirect(Route::Auth));
        }
    }
}
