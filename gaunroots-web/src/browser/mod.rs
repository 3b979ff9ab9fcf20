//! Bindings to the real browser: DOM, local storage, console and timers.

mod alerts_page;
mod auth_page;
mod client;
mod dom;
mod forms;
mod logging;
mod storage;
mod toast;

use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::JsCast;

use crate::{AlertFlow, AuthFlow, NavigationSynchronizer, WebConfig};

pub use client::shared_client;
pub use dom::{DomAnchor, DomButton, DomDocument, LocationNavigator};
pub use logging::{init_logging, install_panic_hook};
pub use storage::LocalStorageSessionStore;
pub use toast::ToastNotifier;

/// Entry point: installs logging, then wires the page once the DOM is ready.
pub fn start() {
    install_panic_hook();
    let config = WebConfig::new();
    init_logging(&config.log_level);
    info!("starting Gaun Roots web layer");

    let Some(document) = DomDocument::current() else {
        warn!("no document available; nothing to bind");
        return;
    };

    if document.inner().ready_state() == "loading" {
        let callback = wasm_bindgen::closure::Closure::once_into_js(move || wire_page(&config));
        if let Err(err) = document
            .inner()
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            warn!(error = ?err, "could not wait for DOMContentLoaded");
        }
    } else {
        wire_page(&config);
    }
}

fn wire_page(config: &WebConfig) {
    let Some(document) = DomDocument::current() else {
        return;
    };

    let session = Rc::new(LocalStorageSessionStore::new());
    let navigator = Rc::new(LocationNavigator);
    NavigationSynchronizer::new(Rc::clone(&session), Rc::clone(&navigator)).sync(&document);

    match shared_client(config) {
        Ok(client) => {
            let notifier = ToastNotifier::new(config.toast_duration_ms);
            let auth = Rc::new(AuthFlow::new(client.clone(), session, navigator, notifier));
            auth_page::mount(document.inner(), &auth);

            let flow = Rc::new(AlertFlow::new(client, notifier));
            alerts_page::mount(document.inner(), &flow);
        }
        Err(err) => warn!(error = %err, "API client unavailable; forms stay inert"),
    }
}
