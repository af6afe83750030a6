//! Device location and reverse-geocoding results.
//!
//! The browser side only reports what happened; everything the wizard needs
//! to decide (which warning to show, whether the address may be edited) is
//! derived here.

use serde::{Deserialize, Serialize};

/// Latitude/longitude reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat`/`lng` query string for the geocoding endpoint
    pub fn query(&self) -> String {
        format!("lat={}&lng={}", self.latitude, self.longitude)
    }

    pub fn label(&self) -> String {
        format!(
            "Latitude: {:.6}, Longitude: {:.6}",
            self.latitude, self.longitude
        )
    }
}

/// Result of asking the browser for the current position
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Located(LocationFix),
    /// The surveyor dismissed the confirmation prompt
    Declined,
    /// The browser (or the user) refused the permission
    PermissionDenied,
    Unsupported,
}

/// Warnings shown under the address field. None of them block the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationWarning {
    Declined,
    PermissionDenied,
    Unsupported,
    GeocodeFailed,
}

impl LocationWarning {
    pub fn message(&self) -> &'static str {
        match self {
            LocationWarning::Declined => "Location access denied by user.",
            LocationWarning::PermissionDenied => {
                "Location permission denied. Please enter address manually."
            }
            LocationWarning::Unsupported => "Geolocation is not supported by this browser.",
            LocationWarning::GeocodeFailed => {
                "Could not fetch address details. Please enter manually."
            }
        }
    }
}

impl LocationOutcome {
    /// Outcome of a failed position request. Denied, unavailable and
    /// timed-out lookups (codes 1 to 3) all fall back to manual entry with
    /// the same warning.
    pub fn from_error_code(code: u16) -> Self {
        tracing::warn!(code, "geolocation failed");
        LocationOutcome::PermissionDenied
    }

    pub fn warning(&self) -> Option<LocationWarning> {
        match self {
            LocationOutcome::Located(_) => None,
            LocationOutcome::Declined => Some(LocationWarning::Declined),
            LocationOutcome::PermissionDenied => Some(LocationWarning::PermissionDenied),
            LocationOutcome::Unsupported => Some(LocationWarning::Unsupported),
        }
    }
}

/// One component of a geocoded address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub address_components: Vec<AddressComponent>,
}

/// Body of `GET /api/geocode`, in the provider's shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    pub status: String,
    pub results: Vec<GeocodeResult>,
}

/// Address fields the wizard fills from a geocoding response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodedAddress {
    pub formatted_address: String,
    pub postcode: Option<String>,
}

impl GeocodeResponse {
    /// First result of an `OK` response. Anything else counts as a failed
    /// lookup and leaves the fields for manual entry.
    pub fn address(&self) -> Option<GeocodedAddress> {
        if self.status != "OK" {
            return None;
        }
        let first = self.results.first()?;
        if first.formatted_address.trim().is_empty() {
            return None;
        }
        let postcode = first
            .address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == "postal_code"))
            .map(|c| c.long_name.clone())
            .filter(|p| !p.trim().is_empty());

        Some(GeocodedAddress {
            formatted_address: first.formatted_address.clone(),
            postcode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_error_asks_for_manual_entry() {
        for code in [1, 2, 3] {
            let outcome = LocationOutcome::from_error_code(code);
            assert_eq!(outcome, LocationOutcome::PermissionDenied);
            assert_eq!(
                outcome.warning().map(|w| w.message()),
                Some("Location permission denied. Please enter address manually.")
            );
        }
    }

    fn response(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_address_with_postcode() {
        let res = response(
            r#"{"status":"OK","results":[{"formatted_address":"Sadar Bazar, Delhi Cantt, 110010",
            "address_components":[{"long_name":"Delhi","short_name":"DL","types":["locality"]},
            {"long_name":"110010","short_name":"110010","types":["postal_code"]}]}]}"#,
        );
        let addr = res.address().unwrap();
        assert_eq!(addr.formatted_address, "Sadar Bazar, Delhi Cantt, 110010");
        assert_eq!(addr.postcode.as_deref(), Some("110010"));
    }

    #[test]
    fn test_missing_postcode() {
        let res = response(
            r#"{"status":"OK","results":[{"formatted_address":"Parade Road","address_components":[]}]}"#,
        );
        assert_eq!(res.address().unwrap().postcode, None);
    }

    #[test]
    fn test_non_ok_status_is_failure() {
        let res = response(r#"{"status":"ZERO_RESULTS","results":[]}"#);
        assert!(res.address().is_none());
    }

    #[test]
    fn test_outcome_warnings() {
        let fix = LocationFix::new(28.59, 77.16);
        assert_eq!(LocationOutcome::Located(fix).warning(), None);
        assert_eq!(
            LocationOutcome::PermissionDenied.warning().unwrap().message(),
            "Location permission denied. Please enter address manually."
        );
        assert_eq!(fix.query(), "lat=28.59&lng=77.16");
    }
}
