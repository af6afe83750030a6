//! Application-wide state shared through Leptos context.

pub mod storage;
pub mod toast;

pub use storage::LocalStorage;
pub use toast::{Toast, ToastKind, Toasts};

use leptos::*;
use std::rc::Rc;
use survey_core::session::{Session, SessionContext};
use survey_core::ClientConfig;

use crate::network::HttpBackend;

/// Handles every screen needs. `Copy`, so closures can capture it freely.
#[derive(Clone, Copy)]
pub struct AppState {
    config: StoredValue<ClientConfig>,
    session: StoredValue<SessionContext<LocalStorage>>,
    backend: StoredValue<Rc<HttpBackend>>,
    pub toasts: Toasts,
    /// Bumped on login/logout so session readers re-run
    session_rev: RwSignal<u64>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionContext::new(LocalStorage);
        let backend = Rc::new(HttpBackend::new(config.clone(), session.clone()));
        Self {
            toasts: Toasts::new(config.notification_timeout_ms),
            config: store_value(config),
            session: store_value(session),
            backend: store_value(backend),
            session_rev: create_rw_signal(0),
        }
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn backend(&self) -> Rc<HttpBackend> {
        self.backend.get_value()
    }

    pub fn session_context(&self) -> SessionContext<LocalStorage> {
        self.session.get_value()
    }

    /// Reactive read of the persisted session
    pub fn session(&self) -> Option<Session> {
        let _ = self.session_rev.get();
        self.session.with_value(|s| s.current())
    }

    pub fn session_changed(&self) {
        self.session_rev.update(|n| *n += 1);
    }

    pub fn logout(&self) {
        if let Err(e) = self.session.with_value(|s| s.logout()) {
            tracing::error!("Failed to clear session: {}", e);
        }
        self.session_changed();
    }
}

pub fn provide_app_state(config: ClientConfig) {
    provide_context(AppState::new(config));
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
