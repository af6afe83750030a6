//! Fundamental types for the property tax survey.
//!
//! Field names on the wire are camelCase and match the backend's stored
//! documents, so a [`SurveyEntry`] can be posted as-is and read back from
//! `GET /api/form/data` without a translation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Gender of the occupier or owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

/// Whether the occupier owns the property or rents it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tenancy {
    #[default]
    Owner,
    Tenant,
}

impl Tenancy {
    pub fn label(&self) -> &'static str {
        match self {
            Tenancy::Owner => "Owner",
            Tenancy::Tenant => "Tenant",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Owner" => Some(Tenancy::Owner),
            "Tenant" => Some(Tenancy::Tenant),
            _ => None,
        }
    }

    pub fn is_tenant(&self) -> bool {
        matches!(self, Tenancy::Tenant)
    }
}

/// Construction type of the surveyed building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingNature {
    Flat,
    #[serde(rename = "Builder Floor")]
    BuilderFloor,
    Residential,
    Commercial,
}

impl BuildingNature {
    pub const ALL: [BuildingNature; 4] = [
        BuildingNature::Flat,
        BuildingNature::BuilderFloor,
        BuildingNature::Residential,
        BuildingNature::Commercial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BuildingNature::Flat => "Flat",
            BuildingNature::BuilderFloor => "Builder Floor",
            BuildingNature::Residential => "Residential",
            BuildingNature::Commercial => "Commercial",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// How the property is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageType {
    Residential,
    Commercial,
}

impl UsageType {
    pub const ALL: [UsageType; 2] = [UsageType::Residential, UsageType::Commercial];

    pub fn label(&self) -> &'static str {
        match self {
            UsageType::Residential => "Residential",
            UsageType::Commercial => "Commercial",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }
}

/// Floor count selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorCount {
    Basement,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
}

impl FloorCount {
    pub const ALL: [FloorCount; 6] = [
        FloorCount::Basement,
        FloorCount::One,
        FloorCount::Two,
        FloorCount::Three,
        FloorCount::Four,
        FloorCount::Five,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FloorCount::Basement => "Basement",
            FloorCount::One => "1",
            FloorCount::Two => "2",
            FloorCount::Three => "3",
            FloorCount::Four => "4",
            FloorCount::Five => "5",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Floor selection as stored by the backend.
///
/// New submissions always carry a single [`FloorCount`]; records created by
/// the older checkbox form hold an array of floor labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloorSelection {
    Single(FloorCount),
    Legacy(Vec<String>),
    Other(String),
}

impl fmt::Display for FloorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorSelection::Single(count) => f.write_str(count.label()),
            FloorSelection::Legacy(floors) => f.write_str(&floors.join(", ")),
            FloorSelection::Other(raw) => f.write_str(raw),
        }
    }
}

/// Landlord details, meaningful only when the occupier is a tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub monthly_rent: String,
    pub owner_name: String,
    pub owner_father_name: String,
    pub owner_mother_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub owner_contact_number: String,
    pub street_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip_code: String,
}

/// One submitted property record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyEntry {
    // Surveyor
    pub surveyor_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    /// ISO date; stored records may carry a full timestamp
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ward_no: String,

    // Location
    pub property_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Occupier
    pub occupiers_name: String,
    #[serde(deserialize_with = "lenient_choice")]
    pub gender: Option<Gender>,
    pub father_name: String,
    pub mother_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contact_number: String,
    #[serde(deserialize_with = "lenient_tenancy")]
    pub owner_or_tenant: Tenancy,
    pub tenant_details: TenantDetails,

    // Property
    #[serde(deserialize_with = "lenient_string")]
    pub area_of_plot: String,
    #[serde(deserialize_with = "lenient_choice")]
    pub nature_of_building: Option<BuildingNature>,
    pub number_of_floors: Option<FloorSelection>,
    #[serde(deserialize_with = "lenient_string")]
    pub floor_area: String,
    #[serde(deserialize_with = "lenient_choice")]
    pub usage_type: Option<UsageType>,

    // Photos as `data:` URLs
    pub main_gate_photo: String,
    pub building_photo: String,
}

impl SurveyEntry {
    /// Calendar date of the submission, if the stored value parses.
    pub fn submitted_on(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Coordinates rendered for display, six decimals each.
    pub fn coordinates_label(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(format!("{lat:.6}, {lng:.6}")),
            _ => None,
        }
    }

    pub fn floors_label(&self) -> String {
        self.number_of_floors
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Where a photo came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Upload { file_name: String },
    Camera,
}

/// A photo already read into memory as a `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub data_url: String,
    pub source: PhotoSource,
}

impl Photo {
    pub fn uploaded(file_name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
            source: PhotoSource::Upload {
                file_name: file_name.into(),
            },
        }
    }

    pub fn captured(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
            source: PhotoSource::Camera,
        }
    }
}

/// The two required photo shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoKind {
    MainGate,
    Building,
}

impl PhotoKind {
    /// Field key used in the error map and on the wire
    pub fn field(&self) -> &'static str {
        match self {
            PhotoKind::MainGate => "mainGatePhoto",
            PhotoKind::Building => "buildingPhoto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhotoKind::MainGate => "Main Gate",
            PhotoKind::Building => "Building",
        }
    }
}

/// Role issued by the backend at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Surveyor,
}

impl Role {
    /// Only the literal backend role `"admin"` grants admin capability.
    pub fn from_backend(role: &str) -> Self {
        if role == "admin" {
            Role::Admin
        } else {
            Role::Surveyor
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Accepts a JSON string, number or null and yields a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// A choice the client doesn't know (or an empty one) reads as unset.
fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Only an explicit tenant counts as one.
fn lenient_tenancy<'de, D>(deserializer: D) -> Result<Tenancy, D::Error>
where
    D: Deserializer<'de>,
{
    let label = lenient_string(deserializer)?;
    Ok(if label.trim().eq_ignore_ascii_case("tenant") {
        Tenancy::Tenant
    } else {
        Tenancy::Owner
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_names() {
        let entry = SurveyEntry {
            surveyor_name: "Asha".to_string(),
            owner_or_tenant: Tenancy::Tenant,
            nature_of_building: Some(BuildingNature::BuilderFloor),
            number_of_floors: Some(FloorSelection::Single(FloorCount::Two)),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["surveyorName"], "Asha");
        assert_eq!(json["ownerOrTenant"], "Tenant");
        assert_eq!(json["natureOfBuilding"], "Builder Floor");
        assert_eq!(json["numberOfFloors"], "2");
        assert!(json["tenantDetails"].get("monthlyRent").is_some());
    }

    #[test]
    fn test_legacy_floor_array_is_accepted() {
        let json = r#"{"surveyorName":"Ravi","numberOfFloors":["Basement","1"],"areaOfPlot":120}"#;
        let entry: SurveyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.floors_label(), "Basement, 1");
        assert_eq!(entry.area_of_plot, "120");
        assert_eq!(entry.owner_or_tenant, Tenancy::Owner);
    }

    #[test]
    fn test_unknown_choices_do_not_sink_the_list() {
        let json = r#"[
            {"surveyorName":"Ravi","gender":"","usageType":"Mixed","ownerOrTenant":"owner","natureOfBuilding":"Hut"},
            {"surveyorName":"Asha","gender":"Female","usageType":"Commercial","ownerOrTenant":"tenant","natureOfBuilding":null},
            {"surveyorName":"Mohan","gender":7,"ownerOrTenant":"Landlord"}
        ]"#;
        let entries: Vec<SurveyEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].gender, None);
        assert_eq!(entries[0].usage_type, None);
        assert_eq!(entries[0].nature_of_building, None);
        assert_eq!(entries[0].owner_or_tenant, Tenancy::Owner);

        assert_eq!(entries[1].gender, Some(Gender::Female));
        assert_eq!(entries[1].usage_type, Some(UsageType::Commercial));
        assert_eq!(entries[1].owner_or_tenant, Tenancy::Tenant);

        assert_eq!(entries[2].gender, None);
        assert_eq!(entries[2].owner_or_tenant, Tenancy::Owner);
    }

    #[test]
    fn test_submitted_on_accepts_timestamps() {
        let entry = SurveyEntry {
            date: "2025-09-14T10:22:00.000Z".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.submitted_on(), NaiveDate::from_ymd_opt(2025, 9, 14));

        let broken = SurveyEntry {
            date: "yesterday".to_string(),
            ..Default::default()
        };
        assert_eq!(broken.submitted_on(), None);
    }

    #[test]
    fn test_role_only_admin_literal() {
        assert!(Role::from_backend("admin").is_admin());
        assert!(!Role::from_backend("Admin").is_admin());
        assert!(!Role::from_backend("surveyor").is_admin());
    }
}
