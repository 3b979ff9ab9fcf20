//! Binds the login and registration forms to an [`AuthFlow`].

use std::rc::Rc;

use shared::SessionRepository;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use super::forms::{bind_submit, field_value, form_by_id};
use crate::account::{AuthFlow, AuthForm, AuthMode};
use crate::navigation::Navigator;
use crate::notifications::Notifier;

const LOGIN_FORM_ID: &str = "login-form";
const REGISTER_FORM_ID: &str = "register-form";

/// Attaches submit handlers to whichever account forms the page has.
pub fn mount<S, V, N>(document: &Document, flow: &Rc<AuthFlow<S, V, N>>)
where
    S: SessionRepository + 'static,
    V: Navigator + 'static,
    N: Notifier + 'static,
{
    for (form_id, mode, prefix) in [
        (LOGIN_FORM_ID, AuthMode::Login, "login"),
        (REGISTER_FORM_ID, AuthMode::Register, "register"),
    ] {
        let Some(form) = form_by_id(document, form_id) else {
            continue;
        };
        let flow = Rc::clone(flow);
        let page = document.clone();
        bind_submit(&form, move |_| {
            let flow = Rc::clone(&flow);
            let values = AuthForm {
                name: field_value(&page, &format!("{prefix}-name")),
                kind: field_value(&page, &format!("{prefix}-type")),
            };
            // Success leaves the page; failures were already shown.
            spawn_local(async move {
                let _ = flow.submit(mode, &values).await;
            });
        });
    }
}
