//! First / Previous / Next / Last controls.

use leptos::*;
use survey_core::dashboard::Pager;

/// Hidden when everything fits on one page. `on_page` receives the
/// requested page; clamping is left to the owner of the pager.
#[component]
pub fn Pagination(
    #[prop(into)] pager: Signal<Pager>,
    #[prop(into)] total: Signal<usize>,
    #[prop(into)] on_page: Callback<usize>,
) -> impl IntoView {
    let page = move || pager.get().page();
    let count = move || pager.get().page_count(total.get());
    let at_start = move || !pager.get().has_previous();
    let at_end = move || !pager.get().has_next(total.get());

    view! {
        <Show when=move || pager.get().shows_controls(total.get())>
            <nav class="pagination">
                <button disabled=at_start on:click=move |_| on_page.call(1)>"First"</button>
                <button
                    disabled=at_start
                    on:click=move |_| on_page.call(page().saturating_sub(1))
                >
                    "Previous"
                </button>
                <span class="page-label">{move || pager.get().label(total.get())}</span>
                <button disabled=at_end on:click=move |_| on_page.call(page() + 1)>"Next"</button>
                <button disabled=at_end on:click=move |_| on_page.call(count())>"Last"</button>
            </nav>
        </Show>
    }
}
