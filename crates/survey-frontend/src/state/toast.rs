//! Transient, dismissible notifications.

use leptos::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast info",
            ToastKind::Success => "toast success",
            ToastKind::Warning => "toast warning",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Notification queue shared through the app state
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    timeout: Duration,
}

impl Toasts {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: store_value(0),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn items(&self) -> Signal<Vec<Toast>> {
        self.items.into()
    }

    /// Stays up until [`Toasts::dismiss`] is called with the returned id.
    pub fn sticky(&self, kind: ToastKind, text: impl Into<String>) -> u64 {
        let mut id = 0;
        self.next_id.update_value(|n| {
            *n += 1;
            id = *n;
        });
        let text = text.into();
        self.items.update(|items| items.push(Toast { id, kind, text }));
        id
    }

    fn timed(&self, kind: ToastKind, text: impl Into<String>) {
        let id = self.sticky(kind, text);
        let this = *self;
        set_timeout(move || this.dismiss(id), self.timeout);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.timed(ToastKind::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.timed(ToastKind::Success, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.timed(ToastKind::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.timed(ToastKind::Error, text);
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self
            .items
            .try_update(|items| items.retain(|t| t.id != id));
    }
}
