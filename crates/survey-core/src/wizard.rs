//! Four-step survey wizard.
//!
//! The wizard is a tagged state machine: one variant per step plus
//! `Submitted`. Moving forward validates only the current step's section of
//! the draft; moving back never validates. Nothing reaches the backend until
//! [`Wizard::begin_submit`] hands out a complete [`SurveyEntry`].

use chrono::NaiveDate;

use crate::api::{SurveyBackend, SurveyorProfile};
use crate::error::{Error, Result};
use crate::geo::{GeocodedAddress, LocationFix, LocationOutcome, LocationWarning};
use crate::types::{
    BuildingNature, FloorCount, FloorSelection, Gender, Photo, PhotoKind, SurveyEntry, Tenancy,
    TenantDetails, UsageType,
};
use crate::validation::{Checker, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Basic,
    Occupier,
    Property,
    Photos,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Basic, Step::Occupier, Step::Property, Step::Photos];

    pub fn number(&self) -> u8 {
        match self {
            Step::Basic => 1,
            Step::Occupier => 2,
            Step::Property => 3,
            Step::Photos => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Basic => "Basic Information",
            Step::Occupier => "Occupier Details",
            Step::Property => "Property Details",
            Step::Photos => "Photos",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Basic => Some(Step::Occupier),
            Step::Occupier => Some(Step::Property),
            Step::Property => Some(Step::Photos),
            Step::Photos => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Basic => None,
            Step::Occupier => Some(Step::Basic),
            Step::Property => Some(Step::Occupier),
            Step::Photos => Some(Step::Property),
        }
    }
}

/// Step 1: surveyor and location
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub surveyor_name: String,
    pub phone: String,
    /// Survey day, fixed when the form opens
    date: NaiveDate,
    pub ward_no: String,
    pub property_address: String,
    pub zip_code: String,
    pub location: Option<LocationFix>,
    /// Set when the address came from geocoding; the field is then read-only.
    pub address_locked: bool,
    pub zip_locked: bool,
}

impl BasicInfo {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            surveyor_name: String::new(),
            phone: String::new(),
            date,
            ward_no: String::new(),
            property_address: String::new(),
            zip_code: String::new(),
            location: None,
            address_locked: false,
            zip_locked: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn validate(&self) -> FieldErrors {
        let mut check = Checker::new();
        check
            .require("surveyorName", &self.surveyor_name, "Surveyor Name is required.")
            .ten_digits("phone", &self.phone, "Phone must be a 10-digit number.")
            .require("wardNo", &self.ward_no, "Ward No is required.")
            .require(
                "propertyAddress",
                &self.property_address,
                "Property Address is required.",
            )
            .require("zipCode", &self.zip_code, "ZIP/Postal Code is required.");
        check.finish()
    }
}

/// Step 2: who lives there
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupierInfo {
    pub occupiers_name: String,
    pub gender: Option<Gender>,
    pub father_name: String,
    pub mother_name: String,
    pub contact_number: String,
    pub tenancy: Tenancy,
    pub tenant: TenantDetails,
}

impl OccupierInfo {
    pub fn validate(&self) -> FieldErrors {
        let mut check = Checker::new();
        check
            .require(
                "occupiersName",
                &self.occupiers_name,
                "Occupier's Name is required.",
            )
            .require_some("gender", &self.gender, "Gender is required.")
            .require("fatherName", &self.father_name, "Father's Name is required.")
            .require("motherName", &self.mother_name, "Mother's Name is required.")
            .ten_digits(
                "contactNumber",
                &self.contact_number,
                "Contact Number must be a 10-digit number.",
            );

        if self.tenancy.is_tenant() {
            let t = &self.tenant;
            check
                .numeric(
                    "monthlyRent",
                    &t.monthly_rent,
                    "Monthly Rent is required and must be a number.",
                )
                .require("ownerName", &t.owner_name, "Owner Name is required.")
                .require(
                    "ownerFatherName",
                    &t.owner_father_name,
                    "Owner's Father's Name is required.",
                )
                .require(
                    "ownerMotherName",
                    &t.owner_mother_name,
                    "Owner's Mother's Name is required.",
                )
                .ten_digits(
                    "ownerContactNumber",
                    &t.owner_contact_number,
                    "Owner's Contact Number must be a 10-digit number.",
                )
                .require("streetAddress", &t.street_address, "Street Address is required.")
                .require(
                    "tenantZipCode",
                    &t.zip_code,
                    "Owner's ZIP/Postal Code is required.",
                );
        }
        check.finish()
    }
}

/// Step 3: the building
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyInfo {
    pub area_of_plot: String,
    pub nature_of_building: Option<BuildingNature>,
    pub number_of_floors: Option<FloorCount>,
    pub floor_area: String,
    pub usage_type: Option<UsageType>,
}

impl PropertyInfo {
    pub fn validate(&self) -> FieldErrors {
        let mut check = Checker::new();
        check
            .numeric(
                "areaOfPlot",
                &self.area_of_plot,
                "Area of Plot is required and must be a number.",
            )
            .require_some(
                "natureOfBuilding",
                &self.nature_of_building,
                "Nature of Building is required.",
            )
            .require_some(
                "numberOfFloors",
                &self.number_of_floors,
                "Number of floors is required.",
            )
            .numeric(
                "floorArea",
                &self.floor_area,
                "Floor Area is required and must be a number.",
            )
            .require_some("usageType", &self.usage_type, "Usage Type is required.");
        check.finish()
    }
}

/// Step 4: the two required shots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoSet {
    pub main_gate: Option<Photo>,
    pub building: Option<Photo>,
}

impl PhotoSet {
    pub fn get(&self, kind: PhotoKind) -> Option<&Photo> {
        match kind {
            PhotoKind::MainGate => self.main_gate.as_ref(),
            PhotoKind::Building => self.building.as_ref(),
        }
    }

    pub fn set(&mut self, kind: PhotoKind, photo: Photo) {
        match kind {
            PhotoKind::MainGate => self.main_gate = Some(photo),
            PhotoKind::Building => self.building = Some(photo),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut check = Checker::new();
        check
            .require(
                PhotoKind::MainGate.field(),
                self.data_url(PhotoKind::MainGate),
                "Main Gate photo is required.",
            )
            .require(
                PhotoKind::Building.field(),
                self.data_url(PhotoKind::Building),
                "Building photo is required.",
            );
        check.finish()
    }

    fn data_url(&self, kind: PhotoKind) -> &str {
        self.get(kind).map(|p| p.data_url.as_str()).unwrap_or("")
    }
}

/// Everything entered so far, across all steps
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDraft {
    pub basic: BasicInfo,
    pub occupier: OccupierInfo,
    pub property: PropertyInfo,
    pub photos: PhotoSet,
}

impl SurveyDraft {
    pub fn new(date: NaiveDate, profile: Option<&SurveyorProfile>) -> Self {
        let mut basic = BasicInfo::new(date);
        if let Some(profile) = profile {
            basic.surveyor_name = profile.name.clone();
            basic.phone = profile.phone.clone();
        }
        Self {
            basic,
            occupier: OccupierInfo::default(),
            property: PropertyInfo::default(),
            photos: PhotoSet::default(),
        }
    }

    pub fn validate_step(&self, step: Step) -> FieldErrors {
        match step {
            Step::Basic => self.basic.validate(),
            Step::Occupier => self.occupier.validate(),
            Step::Property => self.property.validate(),
            Step::Photos => self.photos.validate(),
        }
    }

    /// Submission payload. Photos travel as their `data:` URLs; landlord
    /// details are blanked unless the occupier is a tenant.
    pub fn to_entry(&self) -> SurveyEntry {
        let basic = &self.basic;
        let occupier = &self.occupier;
        let property = &self.property;

        SurveyEntry {
            surveyor_name: basic.surveyor_name.clone(),
            phone: basic.phone.clone(),
            date: basic.date.format("%Y-%m-%d").to_string(),
            ward_no: basic.ward_no.clone(),
            property_address: basic.property_address.clone(),
            zip_code: basic.zip_code.clone(),
            latitude: basic.location.map(|l| l.latitude),
            longitude: basic.location.map(|l| l.longitude),
            occupiers_name: occupier.occupiers_name.clone(),
            gender: occupier.gender,
            father_name: occupier.father_name.clone(),
            mother_name: occupier.mother_name.clone(),
            contact_number: occupier.contact_number.clone(),
            owner_or_tenant: occupier.tenancy,
            tenant_details: if occupier.tenancy.is_tenant() {
                occupier.tenant.clone()
            } else {
                TenantDetails::default()
            },
            area_of_plot: property.area_of_plot.clone(),
            nature_of_building: property.nature_of_building,
            number_of_floors: property.number_of_floors.map(FloorSelection::Single),
            floor_area: property.floor_area.clone(),
            usage_type: property.usage_type,
            main_gate_photo: self.photos.data_url(PhotoKind::MainGate).to_string(),
            building_photo: self.photos.data_url(PhotoKind::Building).to_string(),
        }
    }
}

/// An editable step: the draft plus the errors of the last failed advance
#[derive(Debug, Clone, PartialEq)]
pub struct StepState {
    pub draft: SurveyDraft,
    pub errors: FieldErrors,
}

impl StepState {
    fn new(draft: SurveyDraft) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    Basic(StepState),
    Occupier(StepState),
    Property(StepState),
    Photos(StepState),
    Submitted(SurveyEntry),
}

impl WizardState {
    fn at(step: Step, state: StepState) -> Self {
        match step {
            Step::Basic => WizardState::Basic(state),
            Step::Occupier => WizardState::Occupier(state),
            Step::Property => WizardState::Property(state),
            Step::Photos => WizardState::Photos(state),
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            WizardState::Basic(_) => Some(Step::Basic),
            WizardState::Occupier(_) => Some(Step::Occupier),
            WizardState::Property(_) => Some(Step::Property),
            WizardState::Photos(_) => Some(Step::Photos),
            WizardState::Submitted(_) => None,
        }
    }

    fn step_state(&self) -> Option<&StepState> {
        match self {
            WizardState::Basic(s)
            | WizardState::Occupier(s)
            | WizardState::Property(s)
            | WizardState::Photos(s) => Some(s),
            WizardState::Submitted(_) => None,
        }
    }

    fn step_state_mut(&mut self) -> Option<&mut StepState> {
        match self {
            WizardState::Basic(s)
            | WizardState::Occupier(s)
            | WizardState::Property(s)
            | WizardState::Photos(s) => Some(s),
            WizardState::Submitted(_) => None,
        }
    }

    fn into_step_state(self) -> std::result::Result<StepState, Self> {
        match self {
            WizardState::Basic(s)
            | WizardState::Occupier(s)
            | WizardState::Property(s)
            | WizardState::Photos(s) => Ok(s),
            submitted @ WizardState::Submitted(_) => Err(submitted),
        }
    }
}

pub const SUBMIT_SUCCESS: &str = "Upload successful!";

/// Notification text for a rejected submission
pub fn submit_failure_message(err: &Error) -> String {
    format!("Upload failed: {}", err.user_message("Server error"))
}

/// POST one entry produced by [`Wizard::begin_submit`]. The caller hands the
/// result to [`Wizard::finish_submit`].
pub async fn send_entry<B>(backend: &B, entry: &SurveyEntry) -> Result<()>
where
    B: SurveyBackend + ?Sized,
{
    match backend.submit_entry(entry).await {
        Ok(()) => {
            tracing::info!(surveyor = %entry.surveyor_name, ward = %entry.ward_no, "survey submitted");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "survey submission failed");
            Err(e)
        }
    }
}

static NO_ERRORS: FieldErrors = FieldErrors::new();

/// The wizard plus the bits of UI state that outlive a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    state: WizardState,
    today: NaiveDate,
    profile: Option<SurveyorProfile>,
    location_requested: bool,
    location_warning: Option<LocationWarning>,
    submitting: bool,
}

impl Wizard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: WizardState::Basic(StepState::new(SurveyDraft::new(today, None))),
            today,
            profile: None,
            location_requested: false,
            location_warning: None,
            submitting: false,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Option<Step> {
        self.state.step()
    }

    pub fn draft(&self) -> Option<&SurveyDraft> {
        self.state.step_state().map(|s| &s.draft)
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.step_state().map(|s| &s.errors).unwrap_or(&NO_ERRORS)
    }

    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors().get(field).copied()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn location_warning(&self) -> Option<LocationWarning> {
        self.location_warning
    }

    /// Store the surveyor profile and fill identity fields the surveyor has
    /// not typed yet.
    pub fn apply_profile(&mut self, profile: SurveyorProfile) {
        if let Some(state) = self.state.step_state_mut() {
            let basic = &mut state.draft.basic;
            if basic.surveyor_name.trim().is_empty() {
                basic.surveyor_name = profile.name.clone();
            }
            if basic.phone.trim().is_empty() {
                basic.phone = profile.phone.clone();
            }
        }
        self.profile = Some(profile);
    }

    /// Mutate the draft and clear the error recorded for `field`.
    /// Returns false once the survey has been submitted.
    pub fn edit(&mut self, field: &'static str, f: impl FnOnce(&mut SurveyDraft)) -> bool {
        match self.state.step_state_mut() {
            Some(state) => {
                f(&mut state.draft);
                state.errors.remove(field);
                true
            }
            None => false,
        }
    }

    /// Manual address edit; ignored while the geocoded value is locked.
    pub fn edit_address(&mut self, value: String) -> bool {
        if self.draft().is_some_and(|d| d.basic.address_locked) {
            return false;
        }
        self.edit("propertyAddress", |d| d.basic.property_address = value)
    }

    /// Manual ZIP edit; ignored while the geocoded value is locked.
    pub fn edit_zip(&mut self, value: String) -> bool {
        if self.draft().is_some_and(|d| d.basic.zip_locked) {
            return false;
        }
        self.edit("zipCode", |d| d.basic.zip_code = value)
    }

    pub fn set_photo(&mut self, kind: PhotoKind, photo: Photo) -> bool {
        self.edit(kind.field(), |d| d.photos.set(kind, photo))
    }

    /// Whether the location prompt should be shown now. True once per form,
    /// on step 1.
    pub fn should_request_location(&self) -> bool {
        self.step() == Some(Step::Basic) && !self.location_requested
    }

    pub fn mark_location_requested(&mut self) {
        self.location_requested = true;
    }

    /// Record the geolocation outcome. Returns the fix to reverse-geocode.
    pub fn apply_location(&mut self, outcome: LocationOutcome) -> Option<LocationFix> {
        self.location_warning = outcome.warning();
        match outcome {
            LocationOutcome::Located(fix) => {
                if let Some(state) = self.state.step_state_mut() {
                    state.draft.basic.location = Some(fix);
                }
                Some(fix)
            }
            _ => None,
        }
    }

    /// Fill address fields from a geocoding lookup. `None` means the lookup
    /// failed and the fields stay editable.
    pub fn apply_geocode(&mut self, address: Option<GeocodedAddress>) {
        let Some(address) = address else {
            self.location_warning = Some(LocationWarning::GeocodeFailed);
            return;
        };
        if let Some(state) = self.state.step_state_mut() {
            let basic = &mut state.draft.basic;
            basic.property_address = address.formatted_address;
            basic.address_locked = true;
            match address.postcode {
                Some(zip) => {
                    basic.zip_code = zip;
                    basic.zip_locked = true;
                }
                None => basic.zip_locked = false,
            }
            state.errors.remove("propertyAddress");
            state.errors.remove("zipCode");
        }
    }

    /// Validate the current step and move forward. The last step never
    /// advances here; use [`Wizard::begin_submit`].
    pub fn next(&mut self) -> bool {
        let Some(step) = self.step() else {
            return false;
        };
        let Some(next) = step.next() else {
            return false;
        };
        let Some(state) = self.state.step_state_mut() else {
            return false;
        };

        let errors = state.draft.validate_step(step);
        if !errors.is_empty() {
            tracing::debug!(step = step.number(), failed = errors.len(), "step validation failed");
            state.errors = errors;
            return false;
        }
        state.errors.clear();
        self.move_to(next);
        true
    }

    /// Step back without validating.
    pub fn previous(&mut self) -> bool {
        match self.step().and_then(|s| s.previous()) {
            Some(previous) => {
                self.move_to(previous);
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, to: Step) {
        let current = std::mem::replace(&mut self.state, WizardState::Submitted(SurveyEntry::default()));
        self.state = match current.into_step_state() {
            Ok(state) => WizardState::at(to, state),
            Err(submitted) => submitted,
        };
    }

    /// Validate the photo step and hand out the payload. The wizard stays on
    /// step 4 until [`Wizard::submit_succeeded`] or [`Wizard::submit_failed`].
    pub fn begin_submit(&mut self) -> Result<SurveyEntry> {
        if self.submitting {
            return Err(Error::InvalidTransition("submission already in flight"));
        }
        let WizardState::Photos(state) = &mut self.state else {
            return Err(Error::InvalidTransition("submit is only possible from the photo step"));
        };

        let errors = state.draft.validate_step(Step::Photos);
        if !errors.is_empty() {
            let count = errors.len();
            state.errors = errors;
            return Err(Error::Validation { count });
        }
        state.errors.clear();
        self.submitting = true;
        Ok(state.draft.to_entry())
    }

    /// The backend rejected the submission; everything entered stays put.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        let current = std::mem::replace(&mut self.state, WizardState::Submitted(SurveyEntry::default()));
        self.state = match current {
            WizardState::Photos(state) => WizardState::Submitted(state.draft.to_entry()),
            other => other,
        };
    }

    /// Settle an in-flight submission with the backend's answer. On
    /// failure the draft stays on step 4, untouched, for a retry.
    pub fn finish_submit(&mut self, outcome: &Result<()>) {
        match outcome {
            Ok(()) => self.submit_succeeded(),
            Err(_) => self.submit_failed(),
        }
    }

    /// Fresh form, keeping the surveyor identity from the profile lookup.
    pub fn submit_another(&mut self) {
        self.state = WizardState::Basic(StepState::new(SurveyDraft::new(
            self.today,
            self.profile.as_ref(),
        )));
        self.location_requested = false;
        self.location_warning = None;
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 14).unwrap()
    }

    fn fill_basic(w: &mut Wizard) {
        w.edit("surveyorName", |d| d.basic.surveyor_name = "Ravi".into());
        w.edit("phone", |d| d.basic.phone = "9876543210".into());
        w.edit("wardNo", |d| d.basic.ward_no = "4".into());
        w.edit_address("12 Mall Road".into());
        w.edit_zip("110010".into());
    }

    fn fill_occupier(w: &mut Wizard) {
        w.edit("occupiersName", |d| d.occupier.occupiers_name = "Meena".into());
        w.edit("gender", |d| d.occupier.gender = Some(Gender::Female));
        w.edit("fatherName", |d| d.occupier.father_name = "Suresh".into());
        w.edit("motherName", |d| d.occupier.mother_name = "Kamla".into());
        w.edit("contactNumber", |d| d.occupier.contact_number = "9123456789".into());
    }

    fn fill_property(w: &mut Wizard) {
        w.edit("areaOfPlot", |d| d.property.area_of_plot = "150".into());
        w.edit("natureOfBuilding", |d| {
            d.property.nature_of_building = Some(BuildingNature::Residential)
        });
        w.edit("numberOfFloors", |d| d.property.number_of_floors = Some(FloorCount::Two));
        w.edit("floorArea", |d| d.property.floor_area = "90.5".into());
        w.edit("usageType", |d| d.property.usage_type = Some(UsageType::Residential));
    }

    fn wizard_at_photos() -> Wizard {
        let mut w = Wizard::new(today());
        fill_basic(&mut w);
        assert!(w.next());
        fill_occupier(&mut w);
        assert!(w.next());
        fill_property(&mut w);
        assert!(w.next());
        assert_eq!(w.step(), Some(Step::Photos));
        w
    }

    #[test]
    fn test_empty_basic_step_blocks() {
        let mut w = Wizard::new(today());
        assert!(!w.next());
        assert_eq!(w.step(), Some(Step::Basic));
        assert_eq!(w.errors().len(), 5);
        assert_eq!(w.error("phone"), Some("Phone must be a 10-digit number."));
    }

    #[test]
    fn test_each_basic_rule_blocks_advance() {
        let cases: [(&str, fn(&mut SurveyDraft)); 5] = [
            ("surveyorName", |d| d.basic.surveyor_name = "   ".into()),
            ("phone", |d| d.basic.phone = "98765".into()),
            ("wardNo", |d| d.basic.ward_no.clear()),
            ("propertyAddress", |d| d.basic.property_address.clear()),
            ("zipCode", |d| d.basic.zip_code.clear()),
        ];
        for (field, break_it) in cases {
            let mut w = Wizard::new(today());
            fill_basic(&mut w);
            w.edit(field, break_it);
            assert!(!w.next(), "{field} should block");
            assert_eq!(w.errors().keys().copied().collect::<Vec<_>>(), vec![field]);
        }
    }

    #[test]
    fn test_owner_skips_tenant_block() {
        let mut w = Wizard::new(today());
        fill_basic(&mut w);
        w.next();
        fill_occupier(&mut w);
        w.edit("monthlyRent", |d| d.occupier.tenant.monthly_rent = "lots".into());
        assert!(w.next());
        assert_eq!(w.step(), Some(Step::Property));
    }

    #[test]
    fn test_tenant_block_required() {
        let mut w = Wizard::new(today());
        fill_basic(&mut w);
        w.next();
        fill_occupier(&mut w);
        w.edit("ownerOrTenant", |d| d.occupier.tenancy = Tenancy::Tenant);
        assert!(!w.next());
        for key in [
            "monthlyRent",
            "ownerName",
            "ownerFatherName",
            "ownerMotherName",
            "ownerContactNumber",
            "streetAddress",
            "tenantZipCode",
        ] {
            assert!(w.errors().contains_key(key), "missing {key}");
        }

        w.edit("tenant", |d| {
            d.occupier.tenant = TenantDetails {
                monthly_rent: "8000".into(),
                owner_name: "Harish".into(),
                owner_father_name: "Mohan".into(),
                owner_mother_name: "Sita".into(),
                owner_contact_number: "9988776655".into(),
                street_address: "7 Cariappa Marg".into(),
                zip_code: "110010".into(),
            }
        });
        assert!(w.next());
    }

    #[test]
    fn test_property_numeric_rules() {
        let mut w = Wizard::new(today());
        fill_basic(&mut w);
        w.next();
        fill_occupier(&mut w);
        w.next();
        fill_property(&mut w);
        w.edit("floorArea", |d| d.property.floor_area = "ninety".into());
        assert!(!w.next());
        assert_eq!(
            w.error("floorArea"),
            Some("Floor Area is required and must be a number.")
        );
    }

    #[test]
    fn test_previous_never_validates() {
        let mut w = Wizard::new(today());
        fill_basic(&mut w);
        w.next();
        assert!(w.previous());
        assert_eq!(w.step(), Some(Step::Basic));
        assert!(w.errors().is_empty());
        assert!(!w.previous());
        assert_eq!(w.draft().unwrap().basic.ward_no, "4");
    }

    #[test]
    fn test_submit_requires_both_photos() {
        let mut w = wizard_at_photos();
        w.set_photo(PhotoKind::MainGate, Photo::uploaded("gate.jpg", "data:image/jpeg;base64,AAA"));
        assert_eq!(w.begin_submit(), Err(Error::Validation { count: 1 }));
        assert_eq!(w.error("buildingPhoto"), Some("Building photo is required."));
        assert!(!w.is_submitting());
    }

    #[test]
    fn test_payload_carries_image_data() {
        let mut w = wizard_at_photos();
        w.set_photo(PhotoKind::MainGate, Photo::uploaded("gate.jpg", "data:image/jpeg;base64,AAA"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:image/png;base64,BBB"));
        let entry = w.begin_submit().unwrap();
        assert_eq!(entry.main_gate_photo, "data:image/jpeg;base64,AAA");
        assert_eq!(entry.building_photo, "data:image/png;base64,BBB");
        assert_eq!(entry.date, "2025-09-14");
        assert_eq!(entry.tenant_details, TenantDetails::default());
        assert!(w.is_submitting());
        assert!(matches!(w.begin_submit(), Err(Error::InvalidTransition(_))));
    }

    #[test]
    fn test_failed_submit_keeps_data() {
        let mut w = wizard_at_photos();
        w.set_photo(PhotoKind::MainGate, Photo::captured("data:a"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:b"));
        let before = w.draft().cloned();
        w.begin_submit().unwrap();
        w.submit_failed();
        assert_eq!(w.step(), Some(Step::Photos));
        assert_eq!(w.draft().cloned(), before);
        assert!(w.begin_submit().is_ok());
    }

    #[test]
    fn test_submit_another_keeps_profile_identity() {
        let mut w = Wizard::new(today());
        w.apply_profile(SurveyorProfile {
            name: "Ravi".into(),
            phone: "9876543210".into(),
        });
        w.edit("wardNo", |d| d.basic.ward_no = "4".into());
        w.edit_address("12 Mall Road".into());
        w.edit_zip("110010".into());
        w.mark_location_requested();
        assert!(w.next());
        fill_occupier(&mut w);
        w.next();
        fill_property(&mut w);
        w.next();
        w.set_photo(PhotoKind::MainGate, Photo::captured("data:a"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:b"));
        w.begin_submit().unwrap();
        w.submit_succeeded();
        assert!(matches!(w.state(), WizardState::Submitted(_)));
        assert!(!w.edit("wardNo", |d| d.basic.ward_no.clear()));

        w.submit_another();
        let basic = &w.draft().unwrap().basic;
        assert_eq!(basic.surveyor_name, "Ravi");
        assert_eq!(basic.phone, "9876543210");
        assert!(basic.ward_no.is_empty());
        assert!(w.should_request_location());
    }

    #[test]
    fn test_submission_round_trip_through_backend() {
        use crate::dashboard::DashboardState;
        use crate::testing::FakeBackend;
        use futures::executor::block_on;

        let backend = FakeBackend::default();
        backend
            .submitted
            .borrow_mut()
            .extend((0..22).map(|_| SurveyEntry::default()));

        let mut w = wizard_at_photos();
        w.set_photo(PhotoKind::MainGate, Photo::captured("data:a"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:b"));
        let entry = w.begin_submit().unwrap();
        let outcome = block_on(send_entry(&backend, &entry));
        w.finish_submit(&outcome);
        assert!(outcome.is_ok());
        assert!(matches!(w.state(), WizardState::Submitted(_)));
        assert!(!w.is_submitting());

        let entries = block_on(backend.fetch_entries()).unwrap();
        let mut dashboard = DashboardState::new(entries);
        assert_eq!(dashboard.submission_pager().page_count(23), 3);
        let sizes: Vec<usize> = (1..=3)
            .map(|page| {
                dashboard.go_to_submission_page(page);
                dashboard.current_submissions().len()
            })
            .collect();
        assert_eq!(sizes, vec![10, 10, 3]);
    }

    #[test]
    fn test_rejected_submission_reports_backend_error() {
        use crate::testing::FakeBackend;
        use futures::executor::block_on;

        let backend = FakeBackend {
            reject_with: Some(r#"{"error":"Image too large"}"#.to_string()),
            ..Default::default()
        };
        let mut w = wizard_at_photos();
        w.set_photo(PhotoKind::MainGate, Photo::captured("data:a"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:b"));
        let entry = w.begin_submit().unwrap();
        let outcome = block_on(send_entry(&backend, &entry));
        w.finish_submit(&outcome);
        let err = outcome.unwrap_err();
        assert_eq!(submit_failure_message(&err), "Upload failed: Image too large");
        assert_eq!(w.step(), Some(Step::Photos));
        assert!(!w.is_submitting());
    }

    #[test]
    fn test_survey_date_stays_on_opening_day() {
        let mut w = wizard_at_photos();
        assert_eq!(w.draft().unwrap().basic.date(), today());
        assert!(w.previous());
        assert!(w.previous());
        assert!(w.previous());
        fill_basic(&mut w);
        w.next();
        w.next();
        w.next();
        w.set_photo(PhotoKind::MainGate, Photo::captured("data:a"));
        w.set_photo(PhotoKind::Building, Photo::captured("data:b"));
        let entry = w.begin_submit().unwrap();
        assert_eq!(entry.date, "2025-09-14");
        w.submit_succeeded();

        w.submit_another();
        assert_eq!(w.draft().unwrap().basic.date(), today());
    }

    #[test]
    fn test_geocoded_address_locks_fields() {
        let mut w = Wizard::new(today());
        assert!(w.should_request_location());
        w.mark_location_requested();
        assert!(!w.should_request_location());

        let fix = w
            .apply_location(LocationOutcome::Located(LocationFix::new(28.59, 77.16)))
            .unwrap();
        assert_eq!(fix.latitude, 28.59);
        w.apply_geocode(Some(GeocodedAddress {
            formatted_address: "Sadar Bazar".into(),
            postcode: None,
        }));
        assert!(!w.edit_address("elsewhere".into()));
        assert!(w.edit_zip("110010".into()));
        let basic = &w.draft().unwrap().basic;
        assert_eq!(basic.property_address, "Sadar Bazar");
        assert_eq!(basic.zip_code, "110010");
    }

    #[test]
    fn test_denied_location_allows_manual_entry() {
        let mut w = Wizard::new(today());
        assert_eq!(w.apply_location(LocationOutcome::PermissionDenied), None);
        assert_eq!(w.location_warning(), Some(LocationWarning::PermissionDenied));
        fill_basic(&mut w);
        assert!(w.next());
    }

    #[test]
    fn test_failed_geocode_warns() {
        let mut w = Wizard::new(today());
        w.apply_location(LocationOutcome::Located(LocationFix::new(1.0, 2.0)));
        w.apply_geocode(None);
        assert_eq!(w.location_warning(), Some(LocationWarning::GeocodeFailed));
        assert!(w.edit_address("typed by hand".into()));
    }
}
