use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element};

use crate::config::DEFAULT_TOAST_DURATION_MS;
use crate::notifications::{Notification, Notifier};

const CONTAINER_ID: &str = "toast-container";

/// Shows notifications as dismissible toasts that remove themselves.
#[derive(Debug, Clone, Copy)]
pub struct ToastNotifier {
    duration_ms: u32,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl ToastNotifier {
    #[must_use]
    pub const fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    fn show(&self, notification: &Notification) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let container = container(&document)?;

        let toast = document.create_element("div")?;
        toast.set_class_name(&format!("toast toast-{}", notification.level.as_str()));
        toast.set_attribute("role", "alert")?;

        let text = document.create_element("span")?;
        text.set_text_content(Some(&notification.message));
        toast.append_child(&text)?;

        let close = document.create_element("button")?;
        close.set_class_name("toast-close");
        close.set_attribute("aria-label", "Dismiss")?;
        close.set_text_content(Some("\u{d7}"));
        let target = toast.clone();
        let on_close = Closure::<dyn FnMut()>::wrap(Box::new(move || target.remove()));
        close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
        on_close.forget();
        toast.append_child(&close)?;

        container.append_child(&toast)?;

        // Removing an already dismissed toast is a no-op.
        Timeout::new(self.duration_ms, move || toast.remove()).forget();
        Ok(())
    }
}

fn container(document: &Document) -> Result<Element, JsValue> {
    if let Some(existing) = document.get_element_by_id(CONTAINER_ID) {
        return Ok(existing);
    }
    let container = document.create_element("div")?;
    container.set_id(CONTAINER_ID);
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&container)?;
    Ok(container)
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: &Notification) {
        if let Err(err) = self.show(notification) {
            warn!(error = ?err, message = %notification.message, "could not show notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn appends_toast_with_level_class() {
        ToastNotifier::default().notify(&Notification::error("Login failed"));

        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.get_element_by_id(CONTAINER_ID).unwrap();
        let toast = container.last_element_child().unwrap();
        assert_eq!(toast.class_name(), "toast toast-error");
        assert!(toast.text_content().unwrap().contains("Login failed"));
        toast.remove();
    }
}
