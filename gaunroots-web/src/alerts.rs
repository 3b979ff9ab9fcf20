//! Alert subscription and disease report flows.
//!
//! Both submissions validate phone numbers before any request leaves the
//! browser and report every outcome through a [`Notifier`]. The location is
//! never sent: the backend derives it.

use std::cell::RefCell;

use serde_json::Value;
use shared::{
    ApiError, GaunRootsClient,
    models::{AlertRegistration, DiseaseReport},
    validation::{PhoneNumberError, validate_phone_number},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::notifications::{Notification, Notifier};

pub const SUBSCRIBED_MESSAGE: &str = "Successfully registered for disease alerts";
pub const REPORTED_MESSAGE: &str = "Disease report submitted successfully";
pub const NO_RECENT_ALERTS: &str = "No recent alerts in your area";
pub const DEFAULT_ALERT_RADIUS_KM: u32 = 10;

/// Raw values of the alert subscription form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionForm {
    pub farmer_name: String,
    pub phone_number: String,
    pub crop_types: String,
    pub alert_radius: String,
}

/// Raw values of the disease report form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub disease_name: String,
    pub crop_type: String,
    pub severity: String,
    pub description: String,
    pub reporter_phone: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidPhone(#[from] PhoneNumberError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Text shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the failure happened before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Api(_))
    }
}

/// What the page should do after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// The backend response, unchanged.
    pub response: Value,
    pub reset_form: bool,
    pub close_modal: bool,
}

/// Drives the alert page: subscriptions, reports and the recent-alerts list.
#[derive(Debug)]
pub struct AlertFlow<N> {
    client: GaunRootsClient,
    notifier: N,
    recent: RefCell<Vec<Value>>,
}

impl<N: Notifier> AlertFlow<N> {
    pub fn new(client: GaunRootsClient, notifier: N) -> Self {
        Self {
            client,
            notifier,
            recent: RefCell::new(Vec::new()),
        }
    }

    /// Subscribes a farmer to outbreak alerts.
    ///
    /// # Errors
    /// Returns [`SubmitError`] on invalid input (nothing is sent) or when the
    /// backend call fails. Either way the user has already been notified.
    pub async fn subscribe(&self, form: &SubscriptionForm) -> Result<SubmitOutcome, SubmitError> {
        let registration = self.reported(build_registration(form))?;
        debug!(crops = %registration.crop_types, "submitting alert registration");

        let response = self
            .reported(self.client.register_for_alerts(&registration).await.map_err(SubmitError::from))?;
        self.notifier
            .notify(&Notification::success(server_message(&response, SUBSCRIBED_MESSAGE)));

        Ok(SubmitOutcome {
            response,
            reset_form: true,
            close_modal: false,
        })
    }

    /// Submits a disease report, then refreshes the recent-alerts list.
    ///
    /// # Errors
    /// Same as [`AlertFlow::subscribe`].
    pub async fn report(&self, form: &ReportForm) -> Result<SubmitOutcome, SubmitError> {
        let report = self.reported(build_report(form))?;
        debug!(disease = %report.disease_name, "submitting disease report");

        let response = self
            .reported(self.client.report_disease(&report).await.map_err(SubmitError::from))?;
        self.notifier
            .notify(&Notification::success(server_message(&response, REPORTED_MESSAGE)));

        self.refresh_recent(None).await;

        Ok(SubmitOutcome {
            response,
            reset_form: true,
            close_modal: true,
        })
    }

    /// Reloads recent alerts. Failures are logged and the previous list stays.
    ///
    /// Returns whether the list was replaced.
    pub async fn refresh_recent(&self, location: Option<&str>) -> bool {
        match self.client.fetch_recent_alerts(location).await {
            Ok(response) => {
                let alerts = alerts_from(response);
                debug!(count = alerts.len(), "recent alerts loaded");
                *self.recent.borrow_mut() = alerts;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to load recent alerts");
                false
            }
        }
    }

    /// The last successfully loaded alerts.
    pub fn recent_alerts(&self) -> Vec<Value> {
        self.recent.borrow().clone()
    }

    #[cfg(test)]
    pub(crate) fn seed_recent(&self, alerts: Vec<Value>) {
        *self.recent.borrow_mut() = alerts;
    }

    /// Notifies the user of an error result and passes it through.
    fn reported<T>(&self, result: Result<T, SubmitError>) -> Result<T, SubmitError> {
        if let Err(err) = &result {
            self.notifier.notify(&Notification::error(err.user_message()));
        }
        result
    }
}

fn required(value: &str, field: &'static str) -> Result<String, SubmitError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SubmitError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Validates the subscription form into the request payload.
///
/// # Errors
/// Returns [`SubmitError`] for a blank name or an invalid phone number.
pub fn build_registration(form: &SubscriptionForm) -> Result<AlertRegistration, SubmitError> {
    let farmer_name = required(&form.farmer_name, "name")?;
    let phone_number = validate_phone_number(&form.phone_number)?;
    let alert_radius = form
        .alert_radius
        .trim()
        .parse()
        .unwrap_or(DEFAULT_ALERT_RADIUS_KM);

    Ok(AlertRegistration {
        farmer_name,
        phone_number,
        crop_types: form.crop_types.trim().to_string(),
        alert_radius,
    })
}

/// Validates the report form into the request payload.
///
/// # Errors
/// Returns [`SubmitError`] for missing required fields or a blank or
/// invalid reporter phone.
pub fn build_report(form: &ReportForm) -> Result<DiseaseReport, SubmitError> {
    let disease_name = required(&form.disease_name, "disease")?;
    let crop_type = required(&form.crop_type, "crop")?;
    let severity = required(&form.severity, "severity")?;
    let reporter_phone = validate_phone_number(&form.reporter_phone)?;

    Ok(DiseaseReport {
        disease_name,
        crop_type,
        severity,
        description: optional(&form.description),
        reporter_phone,
    })
}

fn server_message<'a>(response: &'a Value, fallback: &'a str) -> &'a str {
    response
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback)
}

/// Extracts the alert list from a recent-alerts response.
fn alerts_from(response: Value) -> Vec<Value> {
    match response {
        Value::Array(alerts) => alerts,
        Value::Object(mut body) => match body.remove("alerts") {
            Some(Value::Array(alerts)) => alerts,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// One-line summary of an alert for the recent-alerts list.
#[must_use]
pub fn describe_alert(alert: &Value) -> String {
    let field = |key: &str| alert.get(key).and_then(Value::as_str).unwrap_or_default();
    let mut line = format!("{} on {}", field("diseaseName"), field("cropType"));
    if !field("severity").is_empty() {
        line.push_str(&format!(" ({})", field("severity")));
    }
    if !field("location").is_empty() {
        line.push_str(" - ");
        line.push_str(field("location"));
    }
    line
}
