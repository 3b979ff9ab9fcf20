//! Small helpers shared by the page bindings.

use tracing::warn;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{
    Document, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

pub fn form_by_id(document: &Document, id: &str) -> Option<HtmlFormElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

/// Runs `handler` on every submit instead of the browser's default action.
pub fn bind_submit<F>(form: &HtmlFormElement, handler: F)
where
    F: Fn(HtmlFormElement) + 'static,
{
    let target = form.clone();
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        handler(target.clone());
    }));
    if let Err(err) =
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
    {
        warn!(error = ?err, form = %form.id(), "could not bind submit handler");
    }
    closure.forget();
}

/// Current value of an input, select or textarea; empty when missing.
pub fn field_value(document: &Document, id: &str) -> String {
    let Some(element) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}
