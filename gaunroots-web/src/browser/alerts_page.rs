//! Binds the alert page's forms and recent-alerts list to an [`AlertFlow`].

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use super::forms::{bind_submit, field_value, form_by_id};
use crate::alerts::{AlertFlow, NO_RECENT_ALERTS, ReportForm, SubscriptionForm, describe_alert};
use crate::notifications::Notifier;

const SUBSCRIBE_FORM_ID: &str = "alert-registration-form";
const REPORT_FORM_ID: &str = "disease-report-form";
const REPORT_MODAL_ID: &str = "report-modal";
const RECENT_LIST_ID: &str = "recent-alerts-list";
const MODAL_OPEN_CLASS: &str = "open";

/// Attaches submit handlers and loads recent alerts for whichever parts of
/// the alert page are present.
pub fn mount<N: Notifier + 'static>(document: &Document, flow: &Rc<AlertFlow<N>>) {
    if let Some(form) = form_by_id(document, SUBSCRIBE_FORM_ID) {
        let flow = Rc::clone(flow);
        let page = document.clone();
        bind_submit(&form, move |form| {
            let flow = Rc::clone(&flow);
            let values = read_subscription(&page);
            spawn_local(async move {
                if let Ok(outcome) = flow.subscribe(&values).await {
                    if outcome.reset_form {
                        form.reset();
                    }
                }
            });
        });
    }

    if let Some(form) = form_by_id(document, REPORT_FORM_ID) {
        let flow = Rc::clone(flow);
        let page = document.clone();
        bind_submit(&form, move |form| {
            let flow = Rc::clone(&flow);
            let page = page.clone();
            let values = read_report(&page);
            spawn_local(async move {
                let Ok(outcome) = flow.report(&values).await else {
                    return;
                };
                if outcome.reset_form {
                    form.reset();
                }
                if outcome.close_modal {
                    close_modal(&page);
                }
                render_recent(&page, &flow.recent_alerts());
            });
        });
    }

    if document.get_element_by_id(RECENT_LIST_ID).is_some() {
        let flow = Rc::clone(flow);
        let page = document.clone();
        spawn_local(async move {
            if flow.refresh_recent(None).await {
                render_recent(&page, &flow.recent_alerts());
            }
        });
    }
}

fn read_subscription(document: &Document) -> SubscriptionForm {
    SubscriptionForm {
        farmer_name: field_value(document, "farmer-name"),
        phone_number: field_value(document, "phone-number"),
        crop_types: field_value(document, "crop-types"),
        alert_radius: field_value(document, "alert-radius"),
    }
}

fn read_report(document: &Document) -> ReportForm {
    ReportForm {
        disease_name: field_value(document, "disease-name"),
        crop_type: field_value(document, "crop-type"),
        severity: field_value(document, "severity"),
        description: field_value(document, "description"),
        reporter_phone: field_value(document, "reporter-phone"),
    }
}

fn close_modal(document: &Document) {
    if let Some(modal) = document.get_element_by_id(REPORT_MODAL_ID) {
        if let Err(err) = modal.class_list().remove_1(MODAL_OPEN_CLASS) {
            debug!(error = ?err, "could not close report modal");
        }
    }
}

fn render_recent(document: &Document, alerts: &[Value]) {
    if let Err(err) = try_render_recent(document, alerts) {
        warn!(error = ?err, "could not render recent alerts");
    }
}

fn try_render_recent(document: &Document, alerts: &[Value]) -> Result<(), JsValue> {
    let Some(list) = document.get_element_by_id(RECENT_LIST_ID) else {
        return Ok(());
    };
    list.set_text_content(None);

    let lines: Vec<String> = if alerts.is_empty() {
        vec![NO_RECENT_ALERTS.to_string()]
    } else {
        alerts.iter().map(describe_alert).collect()
    };
    for line in &lines {
        let item = document.create_element("li")?;
        item.set_text_content(Some(line));
        list.append_child(&item)?;
    }
    debug!(count = alerts.len(), "recent alerts rendered");
    Ok(())
}
