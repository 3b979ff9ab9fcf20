//! Outgoing payloads for the SMS disease alert endpoints.
//!
//! Neither payload has a location field: the backend resolves the farmer's
//! area itself.

use serde::{Deserialize, Serialize};

/// Subscription to outbreak alerts within a radius of the farmer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertRegistration {
    pub farmer_name: String,
    pub phone_number: String,
    pub crop_types: String,
    /// Radius in kilometres.
    pub alert_radius: u32,
}

/// A farmer's report of a disease sighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseReport {
    pub disease_name: String,
    pub crop_type: String,
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required by the backend; a report without it is rejected.
    pub reporter_phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_uses_camel_case_and_no_location() {
        let registration = AlertRegistration {
            farmer_name: "Sita".into(),
            phone_number: "+9779841234567".into(),
            crop_types: "tomato,potato".into(),
            alert_radius: 10,
        };
        assert_eq!(
            serde_json::to_value(&registration).unwrap(),
            json!({
                "farmerName": "Sita",
                "phoneNumber": "+9779841234567",
                "cropTypes": "tomato,potato",
                "alertRadius": 10
            })
        );
    }

    #[test]
    fn report_omits_missing_description_only() {
        let report = DiseaseReport {
            disease_name: "Late Blight".into(),
            crop_type: "Tomato".into(),
            severity: "high".into(),
            description: None,
            reporter_phone: "9841234567".into(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "diseaseName": "Late Blight",
                "cropType": "Tomato",
                "severity": "high",
                "reporterPhone": "9841234567"
            })
        );
        assert!(value.get("location").is_none());
    }
}
