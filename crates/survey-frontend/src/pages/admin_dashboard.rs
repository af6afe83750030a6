//! Admin dashboard: statistics, surveyor list, submissions and export.

use leptos::*;
use leptos_router::use_navigate;
use survey_core::dashboard::{DashboardState, ViewMode};
use survey_core::session::Route;
use survey_core::{SurveyBackend, Tenancy};

use crate::components::{DetailModal, Pagination};
use crate::pages::SurveyorRegistration;
use crate::state::{use_app_state, ToastKind};
use crate::utils::{download_bytes, js_error_text, today, XLSX_MIME};

const LOAD_FAILED: &str = "Failed to fetch data. Please try again.";

#[derive(Clone, Debug, PartialEq)]
enum Load {
    Loading,
    Failed(String),
    Ready,
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let app = use_app_state();
    let navigate = use_navigate();
    let load = create_rw_signal(Load::Loading);
    let dash = create_rw_signal(DashboardState::with_page_size(
        Vec::new(),
        app.config().page_size,
    ));

    spawn_local(async move {
        match app.backend().fetch_entries().await {
            Ok(entries) => {
                let page_size = app.config().page_size;
                let _ = dash.try_set(DashboardState::with_page_size(entries, page_size));
                let _ = load.try_set(Load::Ready);
            }
            Err(e) => {
                tracing::error!("Failed to load submissions: {}", e);
                let _ = load.try_set(Load::Failed(LOAD_FAILED.to_string()));
            }
        }
    });

    let logout = move |_| {
        app.logout();
        navigate(Route::Auth.path(), Default::default());
    };

    view! {
        {move || match load.get() {
            Load::Loading => view! {
                <div class="loading-screen">
                    <div class="spinner"></div>
                    <p>"Loading Dashboard..."</p>
                </div>
            }
            .into_view(),
            Load::Failed(message) => view! {
                <div class="error-screen">
                    <p>{message}</p>
                </div>
            }
            .into_view(),
            Load::Ready => view! { <DashboardBody dash=dash/> }.into_view(),
        }}
        <div class="admin-bar">
            <h1>"Delhi Cantonment Board 2025"</h1>
            <button class="danger-btn" on:click=logout>"Logout"</button>
        </div>
    }
}

#[component]
fn DashboardBody(dash: RwSignal<DashboardState>) -> impl IntoView {
    let view_mode = create_memo(move |_| dash.with(|d| d.view()));
    let show = move |mode: ViewMode| dash.update(|d| d.show(mode));
    let selected = move || dash.with(|d| d.selected().cloned());

    view! {
        <div class="admin-dashboard">
            {move || match view_mode.get() {
                ViewMode::Dashboard => view! { <Overview dash=dash/> }.into_view(),
                ViewMode::Surveyors => view! { <SurveyorList dash=dash/> }.into_view(),
                ViewMode::Submissions => view! { <Submissions dash=dash/> }.into_view(),
                ViewMode::Register => view! {
                    <SurveyorRegistration on_done=move |_| show(ViewMode::Dashboard)/>
                }
                .into_view(),
            }}

            {move || selected().map(|entry| view! {
                <DetailModal entry=entry on_close=move |_| dash.update(|d| d.close_details())/>
            })}
        </div>
    }
}

#[component]
fn StatCard(title: &'static str, value: usize, accent: &'static str) -> impl IntoView {
    view! {
        <div class=format!("card stat-card {}", accent)>
            <p class="stat-title">{title}</p>
            <p class="stat-value">{value}</p>
        </div>
    }
}

#[component]
fn ActionCard(
    title: &'static str,
    text: &'static str,
    action: &'static str,
    #[prop(into)] on_open: Callback<()>,
) -> impl IntoView {
    view! {
        <button class="card action-card" on:click=move |_| on_open.call(())>
            <h3>{title}</h3>
            <p>{text}</p>
            <span class="action-label">{action}</span>
        </button>
    }
}

#[component]
fn Overview(dash: RwSignal<DashboardState>) -> impl IntoView {
    let stats = dash.with_untracked(|d| d.stats(today()));
    let show = move |mode: ViewMode| Callback::new(move |_: ()| dash.update(|d| d.show(mode)));

    view! {
        <section class="welcome">
            <h2>"Welcome to the Property Tax Survey Portal"</h2>
            <p>
                "You are now logged in to the Delhi Cantonment Property Tax Survey system. "
                "Below, you can check the list of assigned surveyor details and track the forms submitted."
            </p>
        </section>

        <div class="stats-grid">
            <StatCard title="Total Submissions" value=stats.total_submissions accent="blue"/>
            <StatCard title="Active Surveyors" value=stats.active_surveyors accent="green"/>
            <StatCard title="This Month" value=stats.this_month accent="amber"/>
            <StatCard title="Properties Surveyed" value=stats.properties_surveyed accent="purple"/>
        </div>

        <div class="action-grid">
            <ActionCard
                title="View Surveyor List"
                text="Access the complete list of surveyors and their submission statistics. Monitor surveyor performance and activity levels."
                action="View"
                on_open=show(ViewMode::Surveyors)
            />
            <ActionCard
                title="View Submitted Forms"
                text="Review all submitted property tax survey forms with advanced search, filtering, and export capabilities."
                action="View"
                on_open=show(ViewMode::Submissions)
            />
            <ActionCard
                title="Register Surveyor"
                text="Register new surveyors to the system. Ensure all surveyors are properly onboarded and have access to the necessary tools and resources."
                action="Register"
                on_open=show(ViewMode::Register)
            />
        </div>
    }
}

#[component]
fn BackButton(dash: RwSignal<DashboardState>) -> impl IntoView {
    view! {
        <button class="link-btn" on:click=move |_| dash.update(|d| d.show(ViewMode::Dashboard))>
            "Back to Dashboard"
        </button>
    }
}

#[component]
fn SurveyorList(dash: RwSignal<DashboardState>) -> impl IntoView {
    let total = Signal::derive(move || dash.with(|d| d.surveyors().len()));
    let pager = Signal::derive(move || dash.with(|d| d.surveyor_pager()));
    let rows = move || dash.with(|d| d.current_surveyors().to_vec());

    view! {
        <div class="card list-panel">
            <div class="card-header">
                <h2>"Surveyor List"</h2>
                <BackButton dash=dash/>
            </div>
            <h3>{move || format!("Active Surveyors ({})", total.get())}</h3>

            <Show
                when=move || (total.get() > 0)
                fallback=|| view! { <p class="empty">"No surveyors found"</p> }
            >
                <ul class="surveyor-list">
                    {move || rows()
                        .into_iter()
                        .map(|s| {
                            let last = s
                                .last_submission
                                .map(|d| d.format("%d/%m/%Y").to_string())
                                .unwrap_or_else(|| "-".to_string());
                            view! {
                                <li class="surveyor-row">
                                    <div>
                                        <h4>{s.name}</h4>
                                        <p class="muted">{format!("Last activity: {}", last)}</p>
                                    </div>
                                    <span class="badge">{format!("{} submissions", s.submissions)}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ul>
            </Show>

            <Pagination
                pager=pager
                total=total
                on_page=move |page| dash.update(|d| d.go_to_surveyor_page(page))
            />
        </div>
    }
}

#[component]
fn Submissions(dash: RwSignal<DashboardState>) -> impl IntoView {
    let app = use_app_state();
    let exporting = create_rw_signal(false);

    let total = Signal::derive(move || dash.with(|d| d.filtered_len()));
    let pager = Signal::derive(move || dash.with(|d| d.submission_pager()));
    let caption = move || dash.with(|d| d.submission_pager().caption(d.filtered_len(), "submissions"));
    let searching = move || dash.with(|d| !d.query().trim().is_empty());
    let rows = move || {
        dash.with(|d| {
            d.current_submissions()
                .into_iter()
                .map(|(i, e)| (i, e.clone()))
                .collect::<Vec<_>>()
        })
    };

    let export = move |_| {
        if exporting.get_untracked() {
            return;
        }
        let Some(filename) = dash.with_untracked(|d| d.can_export().then(|| d.export_filename(today())))
        else {
            return;
        };

        exporting.set(true);
        let pending = app
            .toasts
            .sticky(ToastKind::Info, "Generating and downloading Excel file...");
        spawn_local(async move {
            let saved = match app.backend().download_excel().await {
                Ok(bytes) => download_bytes(&bytes, &filename, XLSX_MIME).map_err(|e| js_error_text(&e)),
                Err(e) => Err(e.to_string()),
            };
            app.toasts.dismiss(pending);
            match saved {
                Ok(()) => {
                    tracing::info!("Exported {}", filename);
                    app.toasts.success("Excel File Downloaded Successfully!");
                }
                Err(e) => {
                    tracing::error!("Excel export failed: {}", e);
                    app.toasts.error("Failed to download Excel file. Please try again.");
                }
            }
            let _ = exporting.try_set(false);
        });
    };

    view! {
        <div class="card list-panel">
            <div class="card-header">
                <h2>"Submitted Forms"</h2>
                <BackButton dash=dash/>
            </div>

            <div class="toolbar">
                <input
                    type="search"
                    class="input search"
                    placeholder="Search by surveyor, occupier, or address..."
                    prop:value=move || dash.with(|d| d.query().to_string())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        dash.update(|d| d.set_query(query));
                    }
                />
                <button
                    class="primary-btn"
                    disabled=move || exporting.get() || !dash.with(|d| d.can_export())
                    on:click=export
                >
                    {move || if exporting.get() { "Exporting..." } else { "Export to Excel" }}
                </button>
            </div>

            <p class="results-summary">{caption}</p>

            <Show
                when=move || (total.get() > 0)
                fallback=move || view! {
                    <div class="empty">
                        <h3>"No submissions found"</h3>
                        <p>
                            {move || if searching() {
                                "Try adjusting your search criteria"
                            } else {
                                "No form entries have been submitted yet."
                            }}
                        </p>
                    </div>
                }
            >
                <table class="submissions">
                    <thead>
                        <tr>
                            <th>"Surveyor"</th>
                            <th>"Occupier"</th>
                            <th>"Property Address"</th>
                            <th>"Status"</th>
                            <th>"Date"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || rows()
                            .into_iter()
                            .map(|(index, entry)| {
                                let status_class = match entry.owner_or_tenant {
                                    Tenancy::Owner => "badge owner",
                                    Tenancy::Tenant => "badge tenant",
                                };
                                let date = entry
                                    .submitted_on()
                                    .map(|d| d.format("%d/%m/%Y").to_string())
                                    .unwrap_or_else(|| entry.date.clone());
                                view! {
                                    <tr>
                                        <td>{entry.surveyor_name}</td>
                                        <td>{entry.occupiers_name}</td>
                                        <td class="truncate">{entry.property_address}</td>
                                        <td><span class=status_class>{entry.owner_or_tenant.label()}</span></td>
                                        <td>{date}</td>
                                        <td>
                                            <button class="link-btn" on:click=move |_| dash.update(|d| d.select(index))>
                                                "View Details"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </tbody>
                </table>
            </Show>

            <Pagination
                pager=pager
                total=total
                on_page=move |page| dash.update(|d| d.go_to_submission_page(page))
            />
        </div>
    }
}
