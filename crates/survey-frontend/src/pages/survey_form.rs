//! The four-step survey wizard.

use leptos::*;
use leptos_router::use_navigate;
use survey_core::session::Route;
use survey_core::types::{
    BuildingNature, FloorCount, Gender, Photo, PhotoKind, Tenancy, UsageType,
};
use survey_core::wizard::{send_entry, submit_failure_message, Step, SurveyDraft, Wizard, WizardState, SUBMIT_SUCCESS};
use survey_core::{Error, SurveyBackend, SurveyEntry};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlVideoElement};

use crate::components::{ChoiceField, TextField};
use crate::media::{open_camera, request_location, CameraHandle};
use crate::state::{use_app_state, AppState, ToastKind};
use crate::utils::{read_file_as_data_url, today};

fn draft_text(wizard: RwSignal<Wizard>, read: fn(&SurveyDraft) -> String) -> Signal<String> {
    Signal::derive(move || wizard.with(|w| w.draft().map(read).unwrap_or_default()))
}

fn field_error(wizard: RwSignal<Wizard>, field: &'static str) -> Signal<Option<&'static str>> {
    Signal::derive(move || wizard.with(|w| w.error(field)))
}

fn draft_setter(
    wizard: RwSignal<Wizard>,
    field: &'static str,
    write: fn(&mut SurveyDraft, String),
) -> Callback<String> {
    Callback::new(move |value: String| {
        wizard.update(|w| {
            w.edit(field, |d| write(d, value));
        });
    })
}

fn labels<T>(all: &[T], label: fn(&T) -> &'static str) -> Vec<&'static str> {
    all.iter().map(label).collect()
}

/// Fill surveyor name and phone from the stored profile.
fn prefill_profile(app: AppState, wizard: RwSignal<Wizard>) {
    let Some(name) = app.session_context().display_name() else {
        return;
    };
    spawn_local(async move {
        match app.backend().profile(&name).await {
            Ok(profile) => {
                let _ = wizard.try_update(|w| w.apply_profile(profile));
            }
            Err(e) => tracing::warn!("Profile lookup for {} failed: {}", name, e),
        }
    });
}

/// Ask for the position once per form and reverse-geocode it.
fn locate(app: AppState, wizard: RwSignal<Wizard>) {
    wizard.update(|w| w.mark_location_requested());
    spawn_local(async move {
        let outcome = request_location().await;
        let Some(fix) = wizard.try_update(|w| w.apply_location(outcome)).flatten() else {
            return;
        };

        let pending = app.toasts.sticky(ToastKind::Info, "Fetching Location...");
        let address = match app.backend().reverse_geocode(fix).await {
            Ok(response) => response.address(),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                None
            }
        };
        app.toasts.dismiss(pending);
        let _ = wizard.try_update(|w| w.apply_geocode(address));
    });
}

#[component]
pub fn SurveyForm() -> impl IntoView {
    let app = use_app_state();
    let wizard = create_rw_signal(Wizard::new(today()));

    prefill_profile(app, wizard);

    let needs_location = create_memo(move |_| wizard.with(|w| w.should_request_location()));
    create_effect(move |_| {
        if needs_location.get() {
            locate(app, wizard);
        }
    });

    let step = create_memo(move |_| wizard.with(|w| w.step()));

    view! {
        <div class="survey-form">
            {move || match step.get() {
                Some(step) => view! { <WizardSteps wizard=wizard step=step/> }.into_view(),
                None => {
                    let entry = wizard.with_untracked(|w| match w.state() {
                        WizardState::Submitted(entry) => entry.clone(),
                        _ => SurveyEntry::default(),
                    });
                    view! { <Submitted wizard=wizard entry=entry/> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn WizardSteps(wizard: RwSignal<Wizard>, step: Step) -> impl IntoView {
    let app = use_app_state();

    let submit = move |_| {
        let Some(result) = wizard.try_update(|w| w.begin_submit()) else {
            return;
        };
        let entry = match result {
            Ok(entry) => entry,
            Err(Error::Validation { count }) => {
                tracing::debug!("Photo step has {} missing fields", count);
                return;
            }
            Err(e) => {
                tracing::warn!("Submit ignored: {}", e);
                return;
            }
        };

        let pending = app.toasts.sticky(ToastKind::Info, "Uploading...");
        spawn_local(async move {
            let backend = app.backend();
            let outcome = send_entry(backend.as_ref(), &entry).await;
            app.toasts.dismiss(pending);
            wizard.update(|w| w.finish_submit(&outcome));
            match outcome {
                Ok(()) => app.toasts.success(SUBMIT_SUCCESS),
                Err(e) => app.toasts.error(submit_failure_message(&e)),
            }
        });
    };

    view! {
        <div class="wizard">
            <ol class="step-indicator">
                {Step::ALL
                    .iter()
                    .map(|s| {
                        let class = if *s == step { "step active" } else if s.number() < step.number() { "step done" } else { "step" };
                        view! {
                            <li class=class>
                                <span class="step-number">{s.number()}</span>
                                <span class="step-title">{s.title()}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ol>

            <h2 class="step-heading">{format!("Step {}: {}", step.number(), step.title())}</h2>

            {match step {
                Step::Basic => view! { <BasicStep wizard=wizard/> }.into_view(),
                Step::Occupier => view! { <OccupierStep wizard=wizard/> }.into_view(),
                Step::Property => view! { <PropertyStep wizard=wizard/> }.into_view(),
                Step::Photos => view! { <PhotoStep wizard=wizard/> }.into_view(),
            }}

            <div class="wizard-nav">
                <Show when=move || step.previous().is_some()>
                    <button class="secondary-btn" on:click=move |_| { wizard.update(|w| { w.previous(); }); }>
                        "Previous"
                    </button>
                </Show>
                <Show
                    when=move || step.next().is_some()
                    fallback=move || view! {
                        <button
                            class="primary-btn"
                            disabled=move || wizard.with(|w| w.is_submitting())
                            on:click=submit
                        >
                            {move || if wizard.with(|w| w.is_submitting()) { "Submitting..." } else { "Submit" }}
                        </button>
                    }
                >
                    <button class="primary-btn" on:click=move |_| { wizard.update(|w| { w.next(); }); }>
                        "Next"
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn BasicStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let address_locked = Signal::derive(move || wizard.with(|w| w.draft().is_some_and(|d| d.basic.address_locked)));
    let zip_locked = Signal::derive(move || wizard.with(|w| w.draft().is_some_and(|d| d.basic.zip_locked)));
    let warning = move || wizard.with(|w| w.location_warning().map(|w| w.message()));
    let coordinates = move || {
        wizard.with(|w| w.draft().and_then(|d| d.basic.location).map(|fix| fix.label()))
    };

    let set_address = Callback::new(move |value: String| {
        wizard.update(|w| {
            w.edit_address(value);
        });
    });
    let set_zip = Callback::new(move |value: String| {
        wizard.update(|w| {
            w.edit_zip(value);
        });
    });
    view! {
        <div class="step-fields">
            <TextField
                label="Surveyor Name"
                required=true
                value=draft_text(wizard, |d| d.basic.surveyor_name.clone())
                error=field_error(wizard, "surveyorName")
                on_input=draft_setter(wizard, "surveyorName", |d, v| d.basic.surveyor_name = v)
            />
            <TextField
                label="Phone"
                required=true
                input_type="tel"
                value=draft_text(wizard, |d| d.basic.phone.clone())
                error=field_error(wizard, "phone")
                on_input=draft_setter(wizard, "phone", |d, v| d.basic.phone = v)
            />
            <TextField
                label="Date"
                input_type="date"
                value=draft_text(wizard, |d| d.basic.date().format("%Y-%m-%d").to_string())
                error=Signal::derive(|| None)
                on_input=|_| {}
                readonly=true
            />
            <TextField
                label="Ward No"
                required=true
                value=draft_text(wizard, |d| d.basic.ward_no.clone())
                error=field_error(wizard, "wardNo")
                on_input=draft_setter(wizard, "wardNo", |d, v| d.basic.ward_no = v)
            />
            <TextField
                label="Property Address"
                required=true
                value=draft_text(wizard, |d| d.basic.property_address.clone())
                error=field_error(wizard, "propertyAddress")
                on_input=set_address
                readonly=address_locked
            />
            <TextField
                label="ZIP/Postal Code"
                required=true
                value=draft_text(wizard, |d| d.basic.zip_code.clone())
                error=field_error(wizard, "zipCode")
                on_input=set_zip
                readonly=zip_locked
            />
            {move || coordinates().map(|c| view! { <p class="coordinates">"Coordinates: "{c}</p> })}
            {move || warning().map(|text| view! { <p class="location-warning">{text}</p> })}
        </div>
    }
}

#[component]
fn OccupierStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let is_tenant = move || wizard.with(|w| w.draft().is_some_and(|d| d.occupier.tenancy.is_tenant()));

    view! {
        <div class="step-fields">
            <TextField
                label="Occupier's Name"
                required=true
                value=draft_text(wizard, |d| d.occupier.occupiers_name.clone())
                error=field_error(wizard, "occupiersName")
                on_input=draft_setter(wizard, "occupiersName", |d, v| d.occupier.occupiers_name = v)
            />
            <ChoiceField
                label="Gender"
                options=labels(&Gender::ALL, Gender::label)
                value=draft_text(wizard, |d| d.occupier.gender.map(|g| g.label().to_string()).unwrap_or_default())
                error=field_error(wizard, "gender")
                on_change=draft_setter(wizard, "gender", |d, v| d.occupier.gender = Gender::from_label(&v))
            />
            <TextField
                label="Father's Name"
                required=true
                value=draft_text(wizard, |d| d.occupier.father_name.clone())
                error=field_error(wizard, "fatherName")
                on_input=draft_setter(wizard, "fatherName", |d, v| d.occupier.father_name = v)
            />
            <TextField
                label="Mother's Name"
                required=true
                value=draft_text(wizard, |d| d.occupier.mother_name.clone())
                error=field_error(wizard, "motherName")
                on_input=draft_setter(wizard, "motherName", |d, v| d.occupier.mother_name = v)
            />
            <TextField
                label="Contact Number"
                required=true
                input_type="tel"
                value=draft_text(wizard, |d| d.occupier.contact_number.clone())
                error=field_error(wizard, "contactNumber")
                on_input=draft_setter(wizard, "contactNumber", |d, v| d.occupier.contact_number = v)
            />
            <ChoiceField
                label="Owner or Tenant"
                options=vec![Tenancy::Owner.label(), Tenancy::Tenant.label()]
                placeholder=None
                value=draft_text(wizard, |d| d.occupier.tenancy.label().to_string())
                error=field_error(wizard, "ownerOrTenant")
                on_change=draft_setter(wizard, "ownerOrTenant", |d, v| {
                    d.occupier.tenancy = Tenancy::from_label(&v).unwrap_or_default()
                })
            />

            <Show when=is_tenant>
                <fieldset class="tenant-details">
                    <legend>"Owner Details"</legend>
                    <TextField
                        label="Monthly Rent"
                        required=true
                        input_type="number"
                        value=draft_text(wizard, |d| d.occupier.tenant.monthly_rent.clone())
                        error=field_error(wizard, "monthlyRent")
                        on_input=draft_setter(wizard, "monthlyRent", |d, v| d.occupier.tenant.monthly_rent = v)
                    />
                    <TextField
                        label="Owner Name"
                        required=true
                        value=draft_text(wizard, |d| d.occupier.tenant.owner_name.clone())
                        error=field_error(wizard, "ownerName")
                        on_input=draft_setter(wizard, "ownerName", |d, v| d.occupier.tenant.owner_name = v)
                    />
                    <TextField
                        label="Owner's Father's Name"
                        required=true
                        value=draft_text(wizard, |d| d.occupier.tenant.owner_father_name.clone())
                        error=field_error(wizard, "ownerFatherName")
                        on_input=draft_setter(wizard, "ownerFatherName", |d, v| d.occupier.tenant.owner_father_name = v)
                    />
                    <TextField
                        label="Owner's Mother's Name"
                        required=true
                        value=draft_text(wizard, |d| d.occupier.tenant.owner_mother_name.clone())
                        error=field_error(wizard, "ownerMotherName")
                        on_input=draft_setter(wizard, "ownerMotherName", |d, v| d.occupier.tenant.owner_mother_name = v)
                    />
                    <TextField
                        label="Owner's Contact Number"
                        required=true
                        input_type="tel"
                        value=draft_text(wizard, |d| d.occupier.tenant.owner_contact_number.clone())
                        error=field_error(wizard, "ownerContactNumber")
                        on_input=draft_setter(wizard, "ownerContactNumber", |d, v| d.occupier.tenant.owner_contact_number = v)
                    />
                    <TextField
                        label="Street Address"
                        required=true
                        value=draft_text(wizard, |d| d.occupier.tenant.street_address.clone())
                        error=field_error(wizard, "streetAddress")
                        on_input=draft_setter(wizard, "streetAddress", |d, v| d.occupier.tenant.street_address = v)
                    />
                    <TextField
                        label="Owner's ZIP/Postal Code"
                        required=true
                        value=draft_text(wizard, |d| d.occupier.tenant.zip_code.clone())
                        error=field_error(wizard, "tenantZipCode")
                        on_input=draft_setter(wizard, "tenantZipCode", |d, v| d.occupier.tenant.zip_code = v)
                    />
                </fieldset>
            </Show>
        </div>
    }
}

#[component]
fn PropertyStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="step-fields">
            <TextField
                label="Area of Plot (sq. ft.)"
                required=true
                input_type="number"
                value=draft_text(wizard, |d| d.property.area_of_plot.clone())
                error=field_error(wizard, "areaOfPlot")
                on_input=draft_setter(wizard, "areaOfPlot", |d, v| d.property.area_of_plot = v)
            />
            <ChoiceField
                label="Nature of Building"
                options=labels(&BuildingNature::ALL, BuildingNature::label)
                value=draft_text(wizard, |d| d.property.nature_of_building.map(|n| n.label().to_string()).unwrap_or_default())
                error=field_error(wizard, "natureOfBuilding")
                on_change=draft_setter(wizard, "natureOfBuilding", |d, v| {
                    d.property.nature_of_building = BuildingNature::from_label(&v)
                })
            />
            <ChoiceField
                label="Number of Floors"
                options=labels(&FloorCount::ALL, FloorCount::label)
                value=draft_text(wizard, |d| d.property.number_of_floors.map(|f| f.label().to_string()).unwrap_or_default())
                error=field_error(wizard, "numberOfFloors")
                on_change=draft_setter(wizard, "numberOfFloors", |d, v| {
                    d.property.number_of_floors = FloorCount::from_label(&v)
                })
            />
            <TextField
                label="Floor Area (sq. ft.)"
                required=true
                input_type="number"
                value=draft_text(wizard, |d| d.property.floor_area.clone())
                error=field_error(wizard, "floorArea")
                on_input=draft_setter(wizard, "floorArea", |d, v| d.property.floor_area = v)
            />
            <ChoiceField
                label="Usage Type"
                options=labels(&UsageType::ALL, UsageType::label)
                value=draft_text(wizard, |d| d.property.usage_type.map(|u| u.label().to_string()).unwrap_or_default())
                error=field_error(wizard, "usageType")
                on_change=draft_setter(wizard, "usageType", |d, v| d.property.usage_type = UsageType::from_label(&v))
            />
        </div>
    }
}

fn video_element(video: &HtmlElement<html::Video>) -> &HtmlVideoElement {
    video
}

#[component]
fn PhotoStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let app = use_app_state();
    let camera = store_value(None::<CameraHandle>);
    let capturing = create_rw_signal(None::<PhotoKind>);
    let camera_warning = create_rw_signal(None::<String>);
    let video_ref = create_node_ref::<html::Video>();

    // Hook the live stream up once the preview element exists
    create_effect(move |_| {
        if let (Some(video), Some(_)) = (video_ref.get(), capturing.get()) {
            camera.with_value(|handle| {
                if let Some(handle) = handle {
                    handle.attach(&video);
                }
            });
        }
    });

    // Leaving the step with the dialog open must still stop the camera
    on_cleanup(move || {
        let _ = camera.try_update_value(|handle| {
            if let Some(handle) = handle.take() {
                handle.cancel(None);
            }
        });
    });

    let take_handle = move || {
        let mut taken = None;
        camera.update_value(|handle| taken = handle.take());
        taken
    };

    let open = Callback::new(move |kind: PhotoKind| {
        camera_warning.set(None);
        spawn_local(async move {
            match open_camera(kind).await {
                Ok(handle) => {
                    camera.set_value(Some(handle));
                    capturing.set(Some(kind));
                }
                Err(warning) => camera_warning.set(Some(warning)),
            }
        });
    });

    let capture = move |_| {
        let Some(handle) = take_handle() else {
            return;
        };
        let Some(video) = video_ref.get_untracked() else {
            handle.cancel(None);
            capturing.set(None);
            return;
        };
        match handle.capture(&video) {
            Ok((kind, photo)) => {
                wizard.update(|w| {
                    w.set_photo(kind, photo);
                });
            }
            Err(e) => {
                tracing::warn!("Camera snapshot failed: {}", e);
                app.toasts.error("Error processing image");
            }
        }
        capturing.set(None);
    };

    let cancel = move |_| {
        if let Some(handle) = take_handle() {
            let video = video_ref.get_untracked();
            handle.cancel(video.as_ref().map(video_element));
        }
        capturing.set(None);
    };

    view! {
        <div class="step-fields photos">
            <PhotoSlot wizard=wizard kind=PhotoKind::MainGate on_camera=open/>
            <PhotoSlot wizard=wizard kind=PhotoKind::Building on_camera=open/>
            {move || camera_warning.get().map(|text| view! { <p class="camera-warning">{text}</p> })}

            <Show when=move || capturing.get().is_some()>
                <div class="modal-backdrop">
                    <div class="modal camera-modal">
                        <h3>{move || capturing.get().map(|k| format!("Capture {} Photo", k.label()))}</h3>
                        <video node_ref=video_ref autoplay=true playsinline=true muted=true class="camera-preview"></video>
                        <div class="actions">
                            <button class="primary-btn" on:click=capture>"Capture"</button>
                            <button class="secondary-btn" on:click=cancel>"Cancel"</button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn PhotoSlot(wizard: RwSignal<Wizard>, kind: PhotoKind, on_camera: Callback<PhotoKind>) -> impl IntoView {
    let app = use_app_state();
    let preview = move || {
        wizard.with(|w| w.draft().and_then(|d| d.photos.get(kind)).map(|p| p.data_url.clone()))
    };
    let error = field_error(wizard, kind.field());

    let on_file = move |ev: ev::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        spawn_local(async move {
            match read_file_as_data_url(&file).await {
                Ok(data_url) => {
                    let photo = Photo::uploaded(file.name(), data_url);
                    wizard.update(|w| {
                        w.set_photo(kind, photo);
                    });
                    app.toasts.success("Image Uploaded successfully!");
                }
                Err(e) => {
                    tracing::warn!("Reading {} failed: {:?}", file.name(), e);
                    app.toasts.error("Error processing image");
                }
            }
        });
    };

    view! {
        <div class="photo-slot">
            <span class="field-label">{format!("{} Photo", kind.label())}" *"</span>
            <input type="file" accept="image/*" on:change=on_file/>
            <button type="button" class="secondary-btn" on:click=move |_| on_camera.call(kind)>
                "Use Camera"
            </button>
            {move || preview().map(|src| view! { <img class="photo-thumb" src=src alt=kind.label()/> })}
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </div>
    }
}

#[component]
fn Submitted(wizard: RwSignal<Wizard>, entry: SurveyEntry) -> impl IntoView {
    let app = use_app_state();
    let navigate = use_navigate();

    let logout = move |_| {
        app.logout();
        navigate(Route::Auth.path(), Default::default());
    };

    view! {
        <div class="card submitted">
            <h2>"Survey Submitted"</h2>
            <p>{format!("Thank you, {}. The survey for ward {} has been recorded.", entry.surveyor_name, entry.ward_no)}</p>
            <div class="actions">
                <button class="primary-btn" on:click=move |_| wizard.update(|w| w.submit_another())>
                    "Submit Another"
                </button>
                <button class="danger-btn" on:click=logout>"Logout"</button>
            </div>
        </div>
    }
}
