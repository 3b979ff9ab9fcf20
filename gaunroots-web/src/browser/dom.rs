//! web-sys adapters for the navigation traits.

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::navigation::{
    ClickHandler, Destination, NAV_ROLE_ATTRIBUTE, NavAnchor, NavButton, NavDocument, NavRole,
    Navigator,
};

#[derive(Debug, Clone)]
pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    /// The document of the current window, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    #[must_use]
    pub fn inner(&self) -> &Document {
        &self.document
    }
}

impl NavDocument for DomDocument {
    type Anchor = DomAnchor;
    type Button = DomButton;

    fn anchors_in(&self, container_id: &str) -> Option<Vec<DomAnchor>> {
        let container = self.document.get_element_by_id(container_id)?;
        let nodes = container
            .query_selector_all(&format!("a[{NAV_ROLE_ATTRIBUTE}]"))
            .ok()?;
        Some(
            (0..nodes.length())
                .filter_map(|index| nodes.item(index))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .map(DomAnchor)
                .collect(),
        )
    }

    fn button_by_id(&self, id: &str) -> Option<DomButton> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(DomButton)
    }
}

#[derive(Debug, Clone)]
pub struct DomAnchor(HtmlElement);

impl NavAnchor for DomAnchor {
    fn role(&self) -> Option<NavRole> {
        self.0
            .get_attribute(NAV_ROLE_ATTRIBUTE)
            .and_then(|value| NavRole::from_attribute(&value))
    }

    fn set_href(&self, href: &str) {
        // Only fails for invalid attribute names.
        let _ = self.0.set_attribute("href", href);
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn set_click_handler(&self, handler: Option<ClickHandler>) {
        replace_onclick(&self.0, handler);
    }
}

#[derive(Debug, Clone)]
pub struct DomButton(HtmlElement);

impl NavButton for DomButton {
    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn set_click_handler(&self, handler: ClickHandler) {
        replace_onclick(&self.0, Some(handler));
    }
}

/// Assigns `onclick`, which drops whatever handler was there before.
fn replace_onclick(element: &HtmlElement, handler: Option<ClickHandler>) {
    let Some(handler) = handler else {
        element.set_onclick(None);
        return;
    };
    let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        handler();
    }));
    element.set_onclick(Some(closure.as_ref().unchecked_ref()));
    // Lives as long as the page.
    closure.forget();
}

/// Navigates by assigning `window.location.href`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, destination: Destination) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(destination.href()) {
                tracing::warn!(error = ?err, ?destination, "navigation failed");
            }
        }
    }
}
