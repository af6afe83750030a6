//! Main application component with routing.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use survey_core::ClientConfig;

use crate::components::{Footer, Header, ProtectedRoute, ToastContainer};
use crate::pages::{AdminDashboard, AuthPage, Instructions, SurveyForm};
use crate::state::provide_app_state;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_meta_context();
    provide_app_state(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/survey-frontend.css"/>
        <Title text="Household Survey"/>
        <Meta name="description" content="Delhi Cantonment Board property tax survey"/>

        <Router>
            <div class="app-shell">
                <Header/>
                <main class="container">
                    <Routes>
                        <Route path="/auth" view=AuthPage/>
                        <Route path="/instructions" view=Instructions/>
                        <Route path="/form" view=SurveyForm/>
                        <Route path="/admin-dashboard" view=GuardedDashboard/>
                        <Route path="/*any" view=AuthPage/>
                    </Routes>
                </main>
                <Footer/>
            </div>
            <ToastContainer/>
        </Router>
    }
}

#[component]
fn GuardedDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <AdminDashboard/>
        </ProtectedRoute>
    }
}
