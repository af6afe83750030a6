//! Page header and footer.

use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="site-header">
            <img class="logo" src="/assets/dcb.png" alt="Delhi Cantonment Board"/>
            <div class="site-title">
                <h2>"Household Survey"</h2>
                <p>"Delhi Cantonment Board, 2025"</p>
            </div>
            <img class="logo" src="/assets/visionary-global.png" alt="Visionary Global"/>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>"Cantonment Board Delhi, Sadar Bazar, Delhi Cantt, New Delhi, Delhi 110010, India"</p>
            <p class="credits">
                <span>"Designed By "</span>
                <a href="https://divyashdigital.co.in/" class="credit-link">"Divyash Digital"</a>
            </p>
        </footer>
    }
}
