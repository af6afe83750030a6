//! Notification stack.

use leptos::*;

use crate::state::use_app_state;

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_app_state().toasts;

    view! {
        <div class="toast-container">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <span class="toast-text">{toast.text}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
