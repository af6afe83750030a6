//! Full view of one submission.

use leptos::*;
use survey_core::SurveyEntry;

#[component]
fn Detail(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <p class="detail-row">
            <strong>{label}":"</strong>
            " "
            {value}
        </p>
    }
}

#[component]
fn PhotoPreview(label: &'static str, data_url: String) -> impl IntoView {
    (!data_url.is_empty()).then(|| {
        view! {
            <figure class="photo-preview">
                <img src=data_url alt=label/>
                <figcaption>{label}</figcaption>
            </figure>
        }
    })
}

#[component]
pub fn DetailModal(entry: SurveyEntry, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let date = entry
        .submitted_on()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| entry.date.clone());
    let coordinates = entry.coordinates_label().unwrap_or_default();
    let floors = entry.floors_label();
    let nature = entry
        .nature_of_building
        .map(|n| n.label().to_string())
        .unwrap_or_default();
    let usage = entry
        .usage_type
        .map(|u| u.label().to_string())
        .unwrap_or_default();
    let gender = entry.gender.map(|g| g.label().to_string()).unwrap_or_default();
    let tenant = entry
        .owner_or_tenant
        .is_tenant()
        .then(|| entry.tenant_details.clone());

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
                <h2>"Submission Details"</h2>

                <section>
                    <h3>"Surveyor Info"</h3>
                    <Detail label="Name" value=entry.surveyor_name.clone()/>
                    <Detail label="Phone" value=entry.phone.clone()/>
                    <Detail label="Date" value=date/>
                </section>

                <section>
                    <h3>"Occupier Info"</h3>
                    <Detail label="Name" value=entry.occupiers_name.clone()/>
                    <Detail label="Gender" value=gender/>
                    <Detail label="Father's Name" value=entry.father_name.clone()/>
                    <Detail label="Mother's Name" value=entry.mother_name.clone()/>
                    <Detail label="Contact" value=entry.contact_number.clone()/>
                </section>

                <section>
                    <h3>"Property Info"</h3>
                    <Detail label="Address" value=entry.property_address.clone()/>
                    <Detail label="ZIP Code" value=entry.zip_code.clone()/>
                    <Detail label="Ward No" value=entry.ward_no.clone()/>
                    <Detail label="Property Status" value=entry.owner_or_tenant.label()/>
                    <Detail label="Area of Plot" value=entry.area_of_plot.clone()/>
                    <Detail label="Nature of Building" value=nature/>
                    <Detail label="Number of Floors" value=floors/>
                    <Detail label="Floor Area" value=entry.floor_area.clone()/>
                    <Detail label="Usage Type" value=usage/>
                    <Detail label="Coordinates" value=coordinates/>
                </section>

                {tenant.map(|t| view! {
                    <section>
                        <h3>"Tenant Info"</h3>
                        <Detail label="Owner Name" value=t.owner_name/>
                        <Detail label="Father's Name" value=t.owner_father_name/>
                        <Detail label="Mother's Name" value=t.owner_mother_name/>
                        <Detail label="Contact" value=t.owner_contact_number/>
                        <Detail label="Rent" value=format!("₹ {}", t.monthly_rent)/>
                        <Detail label="Address" value=t.street_address/>
                        <Detail label="ZIP Code" value=t.zip_code/>
                    </section>
                })}

                <section class="photos">
                    <PhotoPreview label="Main Gate" data_url=entry.main_gate_photo.clone()/>
                    <PhotoPreview label="Building" data_url=entry.building_photo.clone()/>
                </section>
            </div>
        </div>
    }
}
