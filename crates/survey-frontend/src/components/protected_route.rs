//! Admin-only route wrapper.

use leptos::*;
use leptos_router::Redirect;
use survey_core::session::{guard_admin, GuardDecision};

use crate::state::use_app_state;

/// Renders `children` for admin sessions; everyone else is sent to the
/// landing route for their session. Re-evaluated whenever the session
/// changes.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let app = use_app_state();
    let children = store_value(children);

    move || match guard_admin(app.session().as_ref()) {
        GuardDecision::Render => children.with_value(|c| c()).into_view(),
        GuardDecision::Redirect(route) => {
            tracing::debug!("Route guard redirecting to {}", route.path());
            view! { <Redirect path=route.path()/> }.into_view()
        }
    }
}
